//! Digit checksums used by the identity and payment card validators.

/// Length of an Israeli national identification number.
pub const ISRAELI_ID_LENGTH: usize = 9;

/// Checks the Israeli national ID checksum.
///
/// Digits are weighted 1, 2, 1, 2, ... from the left; weighted products
/// above 9 are reduced by 9 and the sum must be divisible by 10. Anything
/// other than exactly nine ASCII digits fails.
pub fn israeli_id_checksum(id: &str) -> bool {
    if id.len() != ISRAELI_ID_LENGTH || !id.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = id
        .bytes()
        .enumerate()
        .map(|(index, byte)| {
            let digit = u32::from(byte - b'0');
            let multiplier = (index as u32 % 2) + 1;
            let product = digit * multiplier;
            if product > 9 { product - 9 } else { product }
        })
        .sum();

    sum % 10 == 0
}

/// Checks the Luhn checksum of a digit string.
///
/// Scans right to left doubling every second digit. A non-digit character
/// fails the check.
pub fn luhn_checksum(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut is_even = false;

    for ch in digits.chars().rev() {
        let Some(mut digit) = ch.to_digit(10) else {
            return false;
        };

        if is_even {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }

        sum += digit;
        is_even = !is_even;
    }

    sum % 10 == 0
}
