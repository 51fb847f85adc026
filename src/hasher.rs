//! This module contains functions for hashing files and checking if a staged copy is current.
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Hashes a file and returns the hash as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut buffer = vec![0; CHUNK_SIZE];
    let mut hasher = Sha1::new();

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    let result = hasher.finalize();
    let mut hash = String::with_capacity(result.len() * 2);
    for byte in result {
        hash.push_str(&format!("{:02x}", byte));
    }
    Ok(hash)
}

/// Checks if `dst` is missing or differs from `src`.
/// # Arguments
/// * `src` - The file that would be copied.
/// * `dst` - The staged copy.
pub fn is_file_changed(src: &Path, dst: &Path) -> io::Result<bool> {
    if !dst.is_file() {
        return Ok(true);
    }
    let src_meta = std::fs::metadata(src)?;
    let dst_meta = std::fs::metadata(dst)?;
    if src_meta.len() != dst_meta.len() {
        return Ok(true);
    }
    Ok(hash_file(src)? != hash_file(dst)?)
}
