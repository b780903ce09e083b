/// Group the digits of an unsigned integer string with a `,` every three places.
///
/// Only the digits are grouped; callers keep sign and fraction out of `digits`.
pub fn commify(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
