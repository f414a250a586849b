/// Internet checksum (RFC 1071) over an arbitrary byte span.
///
/// Words are read in network order. A trailing odd byte is padded with a zero
/// byte to form the last word. The sum is kept in a `u32` and the carries are
/// folded back in before taking the ones' complement.
pub fn checksum(buffer: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    let mut words = buffer.chunks_exact(2);
    for word in &mut words {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
        // Fold early so a multi-megabyte buffer can't overflow the accumulator.
        if sum > 0xffff {
            sum = (sum & 0xffff) + (sum >> 16);
        }
    }
    if let [last] = words.remainder() {
        sum += u32::from(u16::from_be_bytes([*last, 0]));
    }

    while (sum >> 16) > 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }

    !(sum as u16)
}
