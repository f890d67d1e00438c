//! Utility functions

/// Masks the local part of an email for log output, e.g. `jo***@mail.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let keep = 2.min(local.chars().count() - 1).max(1);
            let visible: String = local.chars().take(keep).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("john@mail.com"), "jo***@mail.com");
        assert_eq!(mask_email("a@x.com"), "a***@x.com");
        assert_eq!(mask_email("ab@x.com"), "a***@x.com");
    }

    #[test]
    fn test_mask_email_without_at() {
        assert_eq!(mask_email("bad"), "***");
        assert_eq!(mask_email("@x.com"), "***");
    }
}
