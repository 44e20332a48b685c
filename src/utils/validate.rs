use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 允许国际格式：+212 522 123 456、(05) 22-12-34-56
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-.]{6,20}$").expect("Invalid phone regex"));

const WEAK_PASSWORDS: [&str; 9] = [
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "azerty123",
    "motdepasse",
    "abcd1234",
];

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 长度：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone.trim()) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 性别只接受单字符 M / F
pub fn validate_gender(gender: &str) -> Result<(), &'static str> {
    match gender {
        "M" | "F" => Ok(()),
        _ => Err("Gender must be 'M' or 'F'"),
    }
}

/// 联系方式校验：邮箱与电话均为可选
pub fn validate_contact(email: Option<&str>, phone: Option<&str>) -> Result<(), &'static str> {
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    if let Some(phone) = phone.filter(|p| !p.is_empty()) {
        validate_phone(phone)?;
    }
    Ok(())
}

/// 管理员密码策略：至少 8 位，包含字母和数字，不能是常见弱密码
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors: Vec<&str> = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("secretariat.casa").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("contact@excellence.ma").is_ok());
        assert!(validate_email("missing-at.ma").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("+212 522 123 456").is_ok());
        assert!(validate_phone("(05) 22-12-34-56").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("12").is_err());
    }

    #[test]
    fn test_gender_rules() {
        assert!(validate_gender("M").is_ok());
        assert!(validate_gender("F").is_ok());
        assert!(validate_gender("X").is_err());
        assert!(validate_gender("male").is_err());
    }

    #[test]
    fn test_contact_skips_empty_values() {
        assert!(validate_contact(None, None).is_ok());
        assert!(validate_contact(Some(""), Some("")).is_ok());
        assert!(validate_contact(Some("nope"), None).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Casablanca2024").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("1234567890").is_err());

        let err = validate_password("Admin123").unwrap_err();
        assert!(err.contains("too common"));
    }
}
