#![cfg_attr(not(test), no_std)]

use core::str::Utf8Error;

pub fn remove_invalid_utf8(buffer: &mut [u8]) {
    // make sure all bytes are utf8 compliant
    for byte in buffer.iter_mut() {
        if *byte > 0x7F {
            *byte = b'*';
        }
    }
}

pub fn str_from_utf8(buffer: &mut [u8]) -> Result<&str, Utf8Error> {
    remove_invalid_utf8(buffer);
    core::str::from_utf8(buffer)
}

/// Decodes a NUL padded identifier, stopping at the first NUL.
pub fn str_from_nul_padded(buffer: &mut [u8]) -> Result<&str, Utf8Error> {
    let end = buffer
        .iter()
        .position(|&c| c == b'\0')
        .unwrap_or(buffer.len());
    str_from_utf8(&mut buffer[..end])
}

/// Copies `text` into a NUL padded buffer, truncating if it does not fit.
pub fn nul_padded<const N: usize>(text: &str) -> [u8; N] {
    let mut buffer = [b'\0'; N];
    let length = text.len().min(N);
    buffer[..length].copy_from_slice(&text.as_bytes()[..length]);
    buffer
}
