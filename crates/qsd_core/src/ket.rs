//! Little-endian ket labels for basis indices.

use bitvec::prelude::*;

/// Renders a basis index as a `|b0b1...⟩` label of `qubit_count` bits.
///
/// Bit `i` of the label is `(index >> i) & 1`, so the least significant
/// bit comes first, matching the qubit ordering of the enumeration engine.
/// `qubit_count` must be at most 64.
pub fn render_ket(index: u64, qubit_count: usize) -> String {
    debug_assert!(qubit_count <= u64::BITS as usize);
    let bits = index.view_bits::<Lsb0>();
    let mut label = String::with_capacity(qubit_count + 4);
    label.push('|');
    for bit in bits.iter().take(qubit_count) {
        label.push(if *bit { '1' } else { '0' });
    }
    label.push('⟩');
    label
}

/// Parses a `|b0b1...⟩` label back into `(index, qubit_count)`.
///
/// Inverse of [`render_ket`]; returns `None` for anything that is not a
/// well-formed bit-string ket.
pub fn parse_ket(label: &str) -> Option<(u64, usize)> {
    let inner = label.strip_prefix('|')?.strip_suffix('⟩')?;
    let mut index = 0u64;
    let mut count = 0usize;
    for c in inner.chars() {
        match c {
            '0' => {}
            '1' => index |= 1u64 << count,
            _ => return None,
        }
        count += 1;
    }
    Some((index, count))
}
