//! Bearer credential extraction
//!
//! Pulls the opaque token out of an `Authorization: Bearer <token>` header.
//! The extracted string is not validated here; the codec or the refresh
//! token store decides whether it means anything.

use std::collections::HashMap;

use crate::errors::AuthError;

/// Name of the header carrying bearer credentials
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// The only accepted authorization scheme
pub const BEARER_SCHEME: &str = "Bearer";

/// Read access to request headers, matched case-insensitively by name
pub trait HeaderSource {
    /// First value of header `name`, if present and representable as text
    fn header_value(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for HashMap<String, Vec<String>> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}

impl HeaderSource for HashMap<String, String> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    fn header_value(&self, name: &str) -> Option<&str> {
        (**self).header_value(name)
    }
}

/// Extracts the bearer token from `headers`
///
/// # Returns
///
/// * `Ok(String)` - The trimmed token following `Bearer `
/// * `Err(AuthError::MissingCredential)` - No authorization header, or an empty one
/// * `Err(AuthError::MalformedCredential)` - Not exactly `Bearer <token>`
pub fn extract_bearer_token<H: HeaderSource + ?Sized>(headers: &H) -> Result<String, AuthError> {
    let value = headers
        .header_value(AUTHORIZATION_HEADER)
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingCredential)?;

    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 2 || parts[0] != BEARER_SCHEME {
        return Err(AuthError::MalformedCredential);
    }

    let token = parts[1].trim();
    if token.is_empty() {
        return Err(AuthError::MalformedCredential);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in pairs {
            map.entry(name.to_string()).or_default().push(value.to_string());
        }
        map
    }

    #[test]
    fn test_extracts_bearer_token() {
        let h = headers(&[("Authorization", "Bearer abc123")]);
        assert_eq!(extract_bearer_token(&h).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_header() {
        let h = headers(&[]);
        assert_eq!(extract_bearer_token(&h), Err(AuthError::MissingCredential));

        let h = headers(&[("Authorization", "")]);
        assert_eq!(extract_bearer_token(&h), Err(AuthError::MissingCredential));
    }

    #[test]
    fn test_wrong_scheme() {
        let h = headers(&[("Authorization", "Token abc123")]);
        assert_eq!(extract_bearer_token(&h), Err(AuthError::MalformedCredential));

        let h = headers(&[("Authorization", "bearer abc123")]);
        assert_eq!(extract_bearer_token(&h), Err(AuthError::MalformedCredential));
    }

    #[test]
    fn test_wrong_number_of_parts() {
        for value in ["Bearer", "Bearer a b", "Bearer  abc", "abc123"] {
            let h = headers(&[("Authorization", value)]);
            assert_eq!(
                extract_bearer_token(&h),
                Err(AuthError::MalformedCredential),
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_empty_token_is_malformed() {
        let h = headers(&[("Authorization", "Bearer ")]);
        assert_eq!(extract_bearer_token(&h), Err(AuthError::MalformedCredential));
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let h = headers(&[("authorization", "Bearer xyz")]);
        assert_eq!(extract_bearer_token(&h).unwrap(), "xyz");
    }

    #[test]
    fn test_token_is_trimmed() {
        let h = headers(&[("Authorization", "Bearer xyz\t")]);
        assert_eq!(extract_bearer_token(&h).unwrap(), "xyz");
    }

    #[test]
    fn test_first_value_wins() {
        let h = headers(&[("Authorization", "Bearer first"), ("Authorization", "Bearer second")]);
        assert_eq!(extract_bearer_token(&h).unwrap(), "first");
    }

    #[test]
    fn test_flat_header_map() {
        let mut h: HashMap<String, String> = HashMap::new();
        h.insert("AUTHORIZATION".to_string(), "Bearer flat".to_string());
        assert_eq!(extract_bearer_token(&h).unwrap(), "flat");
    }
}
