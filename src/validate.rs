//! Field rules used with `#[field(validate = ...)]`.

/// Accepts only `http://` and `https://` URLs
pub fn http_url(value: &str) -> Result<(), String> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err("Must start with http:// or https://".to_string())
    }
}

pub fn positive<T: PartialOrd + Default>(value: &T) -> Result<(), String> {
    if *value > T::default() {
        Ok(())
    } else {
        Err("Must be greater than zero".to_string())
    }
}
