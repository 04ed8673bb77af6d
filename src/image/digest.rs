/*!
# Image Hash Digests

This module provides the [`ImageDigest`] trait, which computes **hash-based digests** of
memory images and graphs. Digests make it cheap to check that two runs with the same
parameters produced identical output.

The image digest covers the little-endian bytes exactly as they are written to disk, so it
equals e.g. `sha256sum` of the output file.

## Example
```
use graph_gen::image::{ImageDigest, MemoryImage};

let image = MemoryImage::from_words(vec![0xdead, 0, 0]);
assert_eq!(image.digest_sha256().len(), 64);
```
*/

use std::fmt::LowerHex;

use ::digest::{Digest, Output};

use super::*;

/// Trait for computing a **hash digest** of an image-like structure.
pub trait ImageDigest {
    /// Computes a digest using the provided hash function `D`.
    ///
    /// The result is returned as a **hexadecimal string**.
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest;

    /// Computes a **SHA-256 digest**.
    ///
    /// The returned string is exactly 64 characters long.
    fn digest_sha256(&self) -> String {
        self.digest::<sha2::Sha256>()
    }
}

impl ImageDigest for MemoryImage {
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        let mut hasher = D::new();
        for w in self.words() {
            hasher.update(w.to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

impl ImageDigest for Graph {
    /// Encodes the number of nodes followed by every `(u, target, weight, twin)` in adjacency
    /// order; the source and sink are not part of the digest.
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        let mut hasher = D::new();
        hasher.update(self.number_of_nodes().to_le_bytes());

        let mut buffer = [0u8; 16];
        for u in self.vertices() {
            for adj in self.adjacency(u) {
                buffer[0..4].copy_from_slice(&u.to_le_bytes());
                buffer[4..8].copy_from_slice(&adj.target.to_le_bytes());
                buffer[8..12].copy_from_slice(&adj.weight.to_le_bytes());
                buffer[12..16].copy_from_slice(&adj.twin.to_le_bytes());
                hasher.update(buffer);
            }
        }

        format!("{:x}", hasher.finalize())
    }
}
