//! Structural dumps of decoded proofs

use std::io::{Result, Write};

use proofscope_visualize::{Abbreviated, Drawer, Visualize};

use crate::{
    envelope::ProofEnvelope,
    iavl::{InnerNode, LeafNode, TreeInclusionProof},
    operator::{Decoded, DecodedOperator, ProofOperator},
    tendermint::{MultiStoreProof, SimpleValueProof, StoreCommit},
};

impl Visualize for ProofEnvelope {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("proof envelope [{} operators]", self.len()).as_bytes())?;
        drawer.down();
        for (index, op) in self.iter().enumerate() {
            drawer.write(format!("\noperator {index}: ").as_bytes())?;
            drawer = op.visualize(drawer)?;
        }
        drawer.up();
        Ok(drawer)
    }
}

impl Visualize for ProofOperator {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("{:?}", self.type_key).as_bytes())?;
        drawer.down();
        if !self.key.is_empty() {
            drawer.field("key")?;
            drawer = self.key.visualize(drawer)?;
        }
        drawer.field("payload")?;
        drawer = Abbreviated(&self.payload).visualize(drawer)?;
        drawer.field("decoded")?;
        drawer = self.decoded.visualize(drawer)?;
        drawer.up();
        Ok(drawer)
    }
}

impl Visualize for Decoded {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        match self {
            Decoded::Recognized(decoded) => decoded.visualize(drawer),
            Decoded::Unrecognized => {
                drawer.write(b"unrecognized")?;
                Ok(drawer)
            }
        }
    }
}

impl Visualize for DecodedOperator {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        match self {
            DecodedOperator::TreeInclusion(proof) => {
                drawer.write(b"tree inclusion ")?;
                proof.visualize(drawer)
            }
            DecodedOperator::TreeAbsence(proof) => {
                drawer.write(b"tree absence ")?;
                proof.visualize(drawer)
            }
            DecodedOperator::MultiStore(proof) => proof.visualize(drawer),
            DecodedOperator::SimpleValue(proof) => proof.visualize(drawer),
        }
    }
}

impl Visualize for TreeInclusionProof {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("[{} leaves]", self.leaves.len()).as_bytes())?;
        drawer.down();
        drawer.field("key")?;
        drawer = self.key.visualize(drawer)?;

        drawer.heading("leaves")?;
        drawer.down();
        for (index, leaf) in self.leaves.iter().enumerate() {
            drawer.write(format!("\n{index}: ").as_bytes())?;
            drawer = leaf.visualize(drawer)?;
        }
        drawer.up();

        drawer.heading("path")?;
        drawer = visualize_path(&self.path, drawer)?;

        if !self.inner_paths.is_empty() {
            drawer.heading("inner paths")?;
            drawer.down();
            for (index, path) in self.inner_paths.iter().enumerate() {
                drawer.write(format!("\n{index}:").as_bytes())?;
                drawer = visualize_path(path, drawer)?;
            }
            drawer.up();
        }
        drawer.up();
        Ok(drawer)
    }
}

fn visualize_path<W: Write>(path: &[InnerNode], mut drawer: Drawer<W>) -> Result<Drawer<W>> {
    if path.is_empty() {
        drawer.write(b" []")?;
        return Ok(drawer);
    }
    drawer.down();
    for (index, node) in path.iter().enumerate() {
        drawer.write(format!("\n{index}: ").as_bytes())?;
        drawer = node.visualize(drawer)?;
    }
    drawer.up();
    Ok(drawer)
}

impl Visualize for LeafNode {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(b"key ")?;
        drawer = self.key.visualize(drawer)?;
        drawer.write(b" value_hash ")?;
        drawer = self.value_hash.visualize(drawer)?;
        drawer.write(format!(" version {}", self.version).as_bytes())?;
        Ok(drawer)
    }
}

impl Visualize for InnerNode {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(
            format!(
                "height {} size {} version {} left ",
                self.height, self.size, self.version
            )
            .as_bytes(),
        )?;
        drawer = self.left.visualize(drawer)?;
        drawer.write(b" right ")?;
        drawer = self.right.visualize(drawer)?;
        Ok(drawer)
    }
}

impl Visualize for MultiStoreProof {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("multistore [{} stores]", self.stores.len()).as_bytes())?;
        drawer.down();
        drawer.field("key")?;
        drawer = self.key.visualize(drawer)?;
        for store in &self.stores {
            drawer.write(b"\n")?;
            drawer = store.visualize(drawer)?;
        }
        drawer.up();
        Ok(drawer)
    }
}

impl Visualize for StoreCommit {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("{} version {} hash ", self.name, self.version).as_bytes())?;
        drawer = self.commit_hash.visualize(drawer)?;
        Ok(drawer)
    }
}

impl Visualize for SimpleValueProof {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("simple value [{} of {}]", self.index, self.total).as_bytes())?;
        drawer.down();
        drawer.field("key")?;
        drawer = self.key.visualize(drawer)?;
        drawer.field("leaf_hash")?;
        drawer = self.leaf_hash.visualize(drawer)?;
        drawer.heading("aunts")?;
        drawer.down();
        for aunt in &self.aunts {
            drawer.write(b"\n")?;
            drawer = aunt.visualize(drawer)?;
        }
        drawer.up();
        drawer.up();
        Ok(drawer)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proofscope_visualize::visualize_to_string;

    use super::*;

    #[test]
    fn envelope_dump() {
        let proof = TreeInclusionProof {
            key: b"k".to_vec(),
            leaves: vec![LeafNode {
                key: b"k".to_vec(),
                value_hash: vec![0xaa, 0xbb],
                version: 4,
            }],
            path: vec![InnerNode {
                height: 1,
                size: 2,
                version: 4,
                left: vec![],
                right: vec![0xcc],
            }],
            inner_paths: vec![],
        };
        let envelope = ProofEnvelope::new(vec![
            ProofOperator::from_tree_inclusion("iavl:v", proof),
            ProofOperator::unrecognized("other", vec![1, 2]),
        ]);
        let expected = "proof envelope [2 operators]
    operator 0: \"iavl:v\"
        payload: [16 bytes, hex: 016b0101..040001cc]
        decoded: tree inclusion [1 leaves]
            key: [hex: 6b, str: k]
            leaves:
                0: key [hex: 6b, str: k] value_hash [hex: aabb] version 4
            path:
                0: height 1 size 2 version 4 left [hex: ] right [hex: cc]
    operator 1: \"other\"
        payload: [2 bytes, hex: 0102]
        decoded: unrecognized";
        assert_eq!(visualize_to_string(&envelope), expected);
    }

    #[test]
    fn empty_paths_stay_inline() {
        let proof = TreeInclusionProof {
            key: vec![],
            leaves: vec![],
            path: vec![],
            inner_paths: vec![vec![]],
        };
        let dump = visualize_to_string(&proof);
        assert_eq!(
            dump,
            "[0 leaves]\n    key: [hex: ]\n    leaves:\n    path: []\n    inner paths:\n        0: []"
        );
        assert!(dump.lines().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn multistore_dump() {
        let proof = MultiStoreProof {
            key: b"ibc".to_vec(),
            stores: vec![StoreCommit {
                name: "ibc".to_owned(),
                version: 9,
                commit_hash: vec![0x01],
            }],
        };
        assert_eq!(
            visualize_to_string(&proof),
            "multistore [1 stores]\n    key: [hex: 696263, str: ibc]\n    ibc version 9 hash [hex: 01]"
        );
    }
}
