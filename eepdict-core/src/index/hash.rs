//! Key fingerprinting
//!
//! Keys are reduced to a 16-bit CRC (reflected polynomial 0xA001, initial
//! value 0xFFFF, no final XOR). Only the fingerprint is persisted, so two
//! keys with the same CRC are indistinguishable and the second is rejected
//! at registration. With at most 16 bindings the collision risk is accepted.

/// Initial accumulator value
const CRC16_INIT: u16 = 0xFFFF;

/// Reflected CRC-16 polynomial (0x8005 bit-reversed)
const CRC16_POLY: u16 = 0xA001;

/// Compute the fingerprint of a key
pub fn fingerprint(key: &str) -> u16 {
    key.bytes().fold(CRC16_INIT, crc16_update)
}

/// Feed one byte into a CRC-16 accumulator
pub const fn crc16_update(crc: u16, byte: u8) -> u16 {
    let mut crc = crc ^ byte as u16;
    let mut bit = 0;
    while bit < 8 {
        if crc & 1 != 0 {
            crc = (crc >> 1) ^ CRC16_POLY;
        } else {
            crc >>= 1;
        }
        bit += 1;
    }
    crc
}
