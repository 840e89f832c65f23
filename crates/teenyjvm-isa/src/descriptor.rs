/// Counts the number of parameter slots in a JVM method descriptor, e.g.
/// `(II)I` has 2, `(I[IB)V` has 3. Each of `B C S I Z J F D` and each
/// `L<classname>;` or array type (one or more leading `[`) consumes one slot
/// in this subset — `long`/`double` occupy two slots in the full JVM spec, but
/// this subset's Non-goals exclude them, so `param_count` never needs to widen
/// for a two-slot type.
pub fn param_count(descriptor: &str) -> u16 {
    let params = match descriptor
        .strip_prefix('(')
        .and_then(|d| d.split(')').next())
    {
        Some(params) => params,
        None => return 0,
    };

    let mut count = 0u16;
    let mut chars = params.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'B' | 'C' | 'S' | 'I' | 'Z' | 'J' | 'F' | 'D' => count += 1,
            'L' => {
                while chars.next_if(|&c| c != ';').is_some() {}
                chars.next(); // consume ';'
                count += 1;
            }
            '[' => {
                // array-of-array is still one slot; skip any further '[' and
                // the element type token that follows.
                while chars.next_if(|&c| c == '[').is_some() {}
                if let Some('L') = chars.next() {
                    while chars.next_if(|&c| c != ';').is_some() {}
                    chars.next();
                }
                count += 1;
            }
            _ => {}
        }
    }
    count
}
