use std::future::Future;

use super::filename::split_stem_ext;

/// Returns a name for which `exists` reports `false`.
///
/// `desired` comes back unchanged when it is free. Otherwise `stem_1.ext`,
/// `stem_2.ext`, ... are tried in order and the first free candidate wins.
/// The counter has no upper bound. Probe errors are returned as-is.
///
/// The lookup is check-then-act: a concurrent writer can claim the returned
/// name before the caller saves it.
pub async fn resolve_unique_name<F, Fut, E>(desired: &str, mut exists: F) -> Result<String, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    if !exists(desired.to_string()).await? {
        return Ok(desired.to_string());
    }

    let (stem, ext) = split_stem_ext(desired);
    let mut counter: u64 = 1;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}
