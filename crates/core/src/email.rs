//! Email address syntax check.
//!
//! Accepts the common `local@domain` form: a dot-atom local part and a domain
//! made of at least two non-empty labels. Quoted local parts and IP-literal
//! domains are rejected.

const LOCAL_MAX: usize = 64;
const DOMAIN_MAX: usize = 253;
const LABEL_MAX: usize = 63;

/// Returns true if `value` looks like a deliverable email address.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > LOCAL_MAX {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || "!#$%&'*+/=?^_`{|}~-".contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > DOMAIN_MAX {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= LABEL_MAX
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for addr in [
            "jane@example.com",
            "jane.doe+newsletter@mail.example.co.uk",
            "o'brien@example.ie",
            "x@a-b.io",
        ] {
            assert!(is_valid_email(addr), "{addr} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for addr in [
            "",
            "not-an-email",
            "@example.com",
            "jane@",
            "jane@localhost",
            "jane@@example.com",
            "jane@exa mple.com",
            "jane doe@example.com",
            ".jane@example.com",
            "jane.@example.com",
            "ja..ne@example.com",
            "jane@example..com",
            "jane@-example.com",
            "jane@example.com.",
            "jane@example.com@other.com",
        ] {
            assert!(!is_valid_email(addr), "{addr:?} should be invalid");
        }
    }

    #[test]
    fn rejects_oversized_local_part() {
        let local = "a".repeat(LOCAL_MAX + 1);
        assert!(!is_valid_email(&format!("{local}@example.com")));
    }
}
