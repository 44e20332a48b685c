use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成账单编号：`INV-` + 8 位大写十六进制
pub fn generate_invoice_number() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("INV-{}", id[..8].to_uppercase())
}

/// 生成随机字母数字串（用于初始管理员密码）
pub fn generate_random_code(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_format() {
        let number = generate_invoice_number();
        assert_eq!(number.len(), 12);
        assert!(number.starts_with("INV-"));
        assert!(
            number[4..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn test_invoice_numbers_differ() {
        assert_ne!(generate_invoice_number(), generate_invoice_number());
    }

    #[test]
    fn test_random_code_length() {
        let code = generate_random_code(16);
        assert_eq!(code.len(), 16);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
