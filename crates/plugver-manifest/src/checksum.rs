//! MD5 checksums for plugin definitions and assets
//!
//! Every hash written to the manifest is the MD5 digest of the file's bytes,
//! encoded as 32 uppercase hexadecimal characters. Files are streamed in
//! fixed-size blocks so asset size never matters.

use crate::errors::ManifestError;
use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;

/// Read block size used while streaming a file through the digest
pub const BLOCK_SIZE: usize = 8 * 1024;

/// Length of a rendered digest (128 bits as hex)
pub const HASH_LEN: usize = 32;

/// Hash the contents of a file on disk
pub fn file_hash(path: &Path) -> Result<String, ManifestError> {
    let file = File::open(path).map_err(|e| ManifestError::io(path, e))?;
    let hash = reader_hash(file).map_err(|e| ManifestError::io(path, e))?;
    trace!("Hashed {} -> {}", path.display(), hash);
    Ok(hash)
}

/// Hash everything a reader yields, one block at a time
pub fn reader_hash<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Md5::new();
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode_upper(hasher.finalize()))
}

/// Hash an in-memory buffer
pub fn bytes_hash(data: &[u8]) -> String {
    hex::encode_upper(Md5::digest(data))
}
