use arbor_hash::{hash_internal, hash_leaf};
use arbor_merkle::{verify, MerkleError, MerkleTree};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("element-{i}")).collect()
}

#[test]
fn every_index_of_every_small_tree_verifies() {
    for n in 1..=64 {
        let t = MerkleTree::build(names(n)).unwrap();
        for i in 0..n {
            let proof = t.get_proof(i).unwrap();
            assert_eq!(proof.len(), t.depth(), "n={n} i={i}");
            assert!(t.validate_proof(i, &proof).unwrap(), "n={n} i={i}");
            assert!(verify(t.root_digest(), i, &hash_leaf(format!("element-{i}").as_bytes()), &proof));
        }
    }
}

#[test]
fn proof_for_one_index_fails_at_every_other_index() {
    for n in 2..=12 {
        let t = MerkleTree::build(names(n)).unwrap();
        for i in 0..n {
            let proof = t.get_proof(i).unwrap();
            for j in (0..n).filter(|&j| j != i) {
                assert!(!t.validate_proof(j, &proof).unwrap(), "n={n} proof {i} at {j}");
            }
        }
    }
}

#[test]
fn flipping_any_proof_byte_breaks_validation() {
    let t = MerkleTree::build(names(11)).unwrap();
    for i in 0..11 {
        let proof = t.get_proof(i).unwrap();
        for level in 0..proof.len() {
            for byte in 0..32 {
                let mut bad = proof.clone();
                bad.siblings[level][byte] ^= 0x01;
                assert!(!t.validate_proof(i, &bad).unwrap());
            }
        }
    }
}

#[test]
fn truncated_or_extended_proof_is_rejected() {
    let t = MerkleTree::build(names(9)).unwrap();
    let proof = t.get_proof(5).unwrap();
    let mut short = proof.clone();
    short.siblings.pop();
    assert!(!t.validate_proof(5, &short).unwrap());
    let mut long = proof.clone();
    long.siblings.push(*t.root_digest());
    assert!(!t.validate_proof(5, &long).unwrap());
}

#[test]
fn changing_any_element_changes_the_root() {
    for n in 1..=16 {
        let base = MerkleTree::build(names(n)).unwrap();
        for i in 0..n {
            let mut items = names(n);
            items[i].push('!');
            let other = MerkleTree::build(items).unwrap();
            assert_ne!(base.root_digest(), other.root_digest(), "n={n} i={i}");
        }
    }
}

#[test]
fn bounds_are_enforced() {
    let t = MerkleTree::build(names(5)).unwrap();
    assert!(matches!(t.get_proof(5), Err(MerkleError::IndexOutOfRange { index: 5, len: 5 })));
    assert!(matches!(
        t.get_proof(usize::MAX),
        Err(MerkleError::IndexOutOfRange { index: i64::MAX, len: 5 })
    ));
    let single = MerkleTree::build(vec!["a"]).unwrap();
    let err = single.get_proof(usize::MAX).unwrap_err();
    assert_eq!(err.to_string(), format!("index {} out of range for 1 elements", i64::MAX));
}

#[test]
fn literal_three_element_tree() {
    let t = MerkleTree::build(vec!["a", "b", "c"]).unwrap();
    let (ha, hb, hc) = (hash_leaf(b"a"), hash_leaf(b"b"), hash_leaf(b"c"));
    let root = hash_internal(&hash_internal(&ha, &hb), &hash_internal(&hc, &hc));
    assert_eq!(*t.root_digest(), root);
    let proof = t.get_proof(2).unwrap();
    assert_eq!(proof.siblings, vec![hc, hash_internal(&ha, &hb)]);
    assert!(verify(&root, 2, &hc, &proof));
}

#[test]
fn random_byte_elements_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..25 {
        let n = rng.gen_range(1..200);
        let items: Vec<Vec<u8>> = (0..n)
            .map(|_| {
                let len = rng.gen_range(0..48);
                (0..len).map(|_| rng.gen()).collect()
            })
            .collect();
        let t = MerkleTree::build(items.clone()).unwrap();
        let again = MerkleTree::build(items).unwrap();
        assert_eq!(t.root_digest(), again.root_digest());
        for _ in 0..10 {
            let i = rng.gen_range(0..n);
            let proof = t.get_proof(i).unwrap();
            assert!(t.validate_proof(i, &proof).unwrap());
            let decoded = arbor_merkle::InclusionProof::from_bytes(&proof.to_bytes().unwrap()).unwrap();
            assert!(t.validate_proof(i, &decoded).unwrap());
        }
    }
}
