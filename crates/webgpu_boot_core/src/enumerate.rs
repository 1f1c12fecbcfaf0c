/// Runs a count-then-fill query and returns every element it produced.
///
/// `query` is called once with `None`, where it must return the element
/// count, and once more with a buffer of exactly that many default values,
/// where it must return how many elements it wrote. Elements keep the order
/// the query wrote them in. A query writing fewer elements than it announced
/// has its result truncated, so the returned vector never carries unfilled
/// slots.
pub fn enumerate<T, F>(mut query: F) -> Vec<T>
where
    T: Default + Clone,
    F: FnMut(Option<&mut [T]>) -> usize,
{
    let count = query(None);
    if count == 0 {
        return Vec::new();
    }

    let mut items = vec![T::default(); count];
    let written = query(Some(&mut items)).min(count);

    if written < count {
        log::warn!(
            "enumeration announced {} elements but wrote {}",
            count,
            written
        );
        items.truncate(written);
    }

    items
}

/// Fills `out` from `items` following the count-then-fill contract.
///
/// Returns the total count when `out` is `None`, otherwise the number of
/// elements copied, which never exceeds `out.len()`.
pub fn fill<T: Clone>(items: &[T], out: Option<&mut [T]>) -> usize {
    match out {
        None => items.len(),
        Some(out) => {
            let written = items.len().min(out.len());
            out[..written].clone_from_slice(&items[..written]);
            written
        }
    }
}
