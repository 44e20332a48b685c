//! 管理员密码哈希（Argon2id，参数取自 `[argon2]` 配置）

use crate::config::{AppConfig, Argon2Config};
use crate::errors::{EduManageError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

fn hasher(config: &Argon2Config) -> Result<Argon2<'static>> {
    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| EduManageError::validation(format!("Invalid argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub fn hash_with(config: &Argon2Config, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher(config)?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| EduManageError::authentication(format!("Password hashing failed: {e}")))
}

/// 参数编码在 PHC 字符串里，旧参数生成的哈希同样能校验
pub fn verify_with(config: &Argon2Config, password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    match hasher(config) {
        Ok(argon2) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    hash_with(&AppConfig::get().argon2, password)
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    verify_with(&AppConfig::get().argon2, password, stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> Argon2Config {
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_with(&light(), "Casablanca2024").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_with(&light(), "Casablanca2024", &hash));
        assert!(!verify_with(&light(), "casablanca2024", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_with(&light(), "same-password1").unwrap();
        let b = hash_with(&light(), "same-password1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_with(&light(), "anything", "not-a-phc-string"));
        assert!(!verify_with(&light(), "anything", ""));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = Argon2Config {
            memory_cost: 1,
            time_cost: 0,
            parallelism: 0,
        };
        assert!(hash_with(&config, "pw").is_err());
    }
}
