//! Fuzz target for the PPA header decoder.
//!
//! Every payload of at least 12 bytes must decode, and the decoded header
//! must re-encode to the bytes it was read from.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ppatrace::protocol::{decode, PPA_HEADER_LEN};

fuzz_target!(|data: &[u8]| {
    match decode(data) {
        Ok(message) => {
            assert!(data.len() >= PPA_HEADER_LEN);
            assert_eq!(&message.encode_header()[..], &data[..PPA_HEADER_LEN]);
            assert_eq!(message.body, &data[PPA_HEADER_LEN..]);
        }
        Err(_) => assert!(data.len() < PPA_HEADER_LEN),
    }
});
