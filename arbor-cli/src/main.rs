// File: arbor-cli/src/main.rs
use anyhow::{Context, Result};
use arbor_hash::{from_hex, hash_leaf, to_hex};
use arbor_merkle::{checked_index, signed_index, unsigned_index, verify, InclusionProof, MerkleTree};
use arbor_config::{load_config_file, DemoConfig};
use clap::{Parser, Subcommand};
use std::{fs, io, path::{Path, PathBuf}};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name="arbor", version, about="Merkle tree membership proofs")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd
}
#[derive(Subcommand)]
enum Cmd {
    /// Build a tree, print it, then prove and verify one element
    Demo {
        /// Optional config file (toml) listing elements and the index to prove
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, allow_negative_numbers = true)]
        index: Option<i64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the root digest of a tree over the given elements
    Root {
        #[arg(required = true)]
        elements: Vec<String>,
    },
    /// Write an inclusion proof for one element
    Prove {
        #[arg(long, allow_negative_numbers = true)]
        index: i64,
        #[arg(long, default_value = "proof.bin")]
        out: PathBuf,
        #[arg(required = true)]
        elements: Vec<String>,
    },
    /// Check a proof against a root digest, without the rest of the tree
    Verify {
        /// Root digest as hex
        #[arg(long)]
        root: String,
        #[arg(long, allow_negative_numbers = true)]
        index: i64,
        #[arg(long)]
        element: String,
        #[arg(long, default_value = "proof.bin")]
        proof: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn write_proof(proof: &InclusionProof, out: &Path) -> Result<()> {
    fs::write(out, proof.to_bytes()?).with_context(|| format!("write {}", out.display()))?;
    info!(path = %out.display(), siblings = proof.len(), "wrote proof");
    Ok(())
}

/// Flag wins over config; defaults to the first element.
fn demo_index(flag: Option<i64>, configured: Option<usize>) -> i64 {
    flag.or(configured.map(signed_index)).unwrap_or(0)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Demo { config, index, out } => {
            let cfg = match config {
                Some(p) => load_config_file(&p)?,
                None => DemoConfig::default(),
            };
            let tree = MerkleTree::build(cfg.elements)?;
            let stdout = io::stdout();
            tree.print_elements(stdout.lock())?;
            tree.print_nodes(stdout.lock())?;
            println!("root={}", to_hex(tree.root_digest()));

            let index = checked_index(demo_index(index, cfg.proof_index), tree.len())?;
            let proof = tree.get_proof(index)?;
            for (level, sib) in proof.siblings.iter().enumerate() {
                println!("proof[{level}]={}", to_hex(sib));
            }
            let ok = tree.validate_proof(index, &proof)?;
            println!("{ok}");
            if let Some(out) = out.or(cfg.proof_out) {
                write_proof(&proof, &out)?;
            }
        }
        Cmd::Root { elements } => {
            let tree = MerkleTree::build(elements)?;
            println!("{}", to_hex(tree.root_digest()));
        }
        Cmd::Prove { index, out, elements } => {
            let tree = MerkleTree::build(elements)?;
            let index = checked_index(index, tree.len())?;
            let proof = tree.get_proof(index)?;
            write_proof(&proof, &out)?;
            println!("root={}", to_hex(tree.root_digest()));
            for (level, sib) in proof.siblings.iter().enumerate() {
                println!("proof[{level}]={}", to_hex(sib));
            }
        }
        Cmd::Verify { root, index, element, proof } => {
            let root = from_hex(&root).context("parse root")?;
            let index = unsigned_index(index)?;
            let bytes = fs::read(&proof).with_context(|| format!("read {}", proof.display()))?;
            let proof = InclusionProof::from_bytes(&bytes)?;
            let ok = verify(&root, index, &hash_leaf(element.as_bytes()), &proof);
            if !ok {
                warn!(index, "proof rejected");
            }
            println!("{}", if ok { "valid" } else { "invalid" });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_merkle::MerkleError;

    #[test]
    fn demo_index_prefers_flag_then_config() {
        assert_eq!(demo_index(Some(-1), Some(3)), -1);
        assert_eq!(demo_index(None, Some(3)), 3);
        assert_eq!(demo_index(None, None), 0);
    }

    #[test]
    fn oversized_configured_index_is_out_of_range() {
        let index = demo_index(None, Some(usize::MAX));
        assert_eq!(index, i64::MAX);
        assert!(matches!(
            checked_index(index, 6),
            Err(MerkleError::IndexOutOfRange { index: i64::MAX, len: 6 })
        ));
    }

    #[test]
    fn negative_verify_index_matches_other_commands() {
        assert!(matches!(
            unsigned_index(-3),
            Err(MerkleError::IndexOutOfRange { index: -3, .. })
        ));
    }
}
