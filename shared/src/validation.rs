//! 表单校验
//!
//! 校验失败时不发起任何网络请求，错误按字段返回，供行内展示。

use crate::Role;
use std::collections::BTreeMap;

pub const MIN_PASSWORD_LEN: usize = 8;

/// 表单字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Password,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
    Role,
    Subject,
    Message,
}

/// 字段级错误集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// 用户修改某字段后清除该字段的错误
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 第一条错误，用于 toast
    pub fn first(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn looks_like_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// 登录表单
pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !looks_like_email(email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    }
    errors.into_result()
}

/// 注册表单
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    role: Option<Role>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    }
    if let Err(login_errors) = validate_login(email, password) {
        errors.0.extend(login_errors.0);
    }
    if password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            Field::Password,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    if password != confirm {
        errors.insert(Field::ConfirmPassword, "Passwords do not match");
    }
    if role.is_none() {
        errors.insert(Field::Role, "Please choose an account type");
    }
    errors.into_result()
}

/// 修改密码表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.current.is_empty() {
            errors.insert(Field::CurrentPassword, "Current password is required");
        }
        if self.new.is_empty() {
            errors.insert(Field::NewPassword, "New password is required");
        } else if self.new.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                Field::NewPassword,
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }
        if self.new != self.confirm {
            errors.insert(Field::ConfirmPassword, "Passwords do not match");
        }
        errors.into_result()
    }
}

/// 资料表单
pub fn validate_profile(name: &str, email: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    }
    if !looks_like_email(email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }
    errors.into_result()
}

/// 联系表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Name is required");
        }
        if self.email.trim().is_empty() {
            errors.insert(Field::Email, "Email is required");
        } else if !looks_like_email(&self.email) {
            errors.insert(Field::Email, "Please enter a valid email address");
        }
        if self.subject.trim().is_empty() {
            errors.insert(Field::Subject, "Subject is required");
        }
        if self.message.trim().is_empty() {
            errors.insert(Field::Message, "Message is required");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(current: &str, new: &str, confirm: &str) -> PasswordChange {
        PasswordChange {
            current: current.to_string(),
            new: new.to_string(),
            confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_password_change_ok() {
        assert!(change("old-secret", "new-secret-1", "new-secret-1").validate().is_ok());
    }

    #[test]
    fn test_password_change_required_fields() {
        let errors = change("", "", "").validate().unwrap_err();
        assert_eq!(errors.get(Field::CurrentPassword), Some("Current password is required"));
        assert_eq!(errors.get(Field::NewPassword), Some("New password is required"));
        assert_eq!(errors.get(Field::ConfirmPassword), None);
    }

    #[test]
    fn test_password_change_too_short() {
        let errors = change("old", "short", "short").validate().unwrap_err();
        assert_eq!(
            errors.get(Field::NewPassword),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_password_change_mismatch() {
        let errors = change("old", "long-enough", "long-enougH").validate().unwrap_err();
        assert_eq!(errors.get(Field::ConfirmPassword), Some("Passwords do not match"));
        assert_eq!(errors.first(), Some("Passwords do not match"));
    }

    #[test]
    fn test_login_validation() {
        assert!(validate_login("a@b.co", "x").is_ok());
        let errors = validate_login("", "").unwrap_err();
        assert!(errors.get(Field::Email).is_some());
        assert!(errors.get(Field::Password).is_some());
        assert!(validate_login("no-at-sign", "x").is_err());
    }

    #[test]
    fn test_registration_validation() {
        assert!(
            validate_registration("Ana", "ana@x.org", "password1", "password1", Some(Role::User))
                .is_ok()
        );
        let errors =
            validate_registration("", "ana@x.org", "short", "other", Some(Role::User)).unwrap_err();
        assert!(errors.get(Field::Name).is_some());
        assert!(errors.get(Field::Password).is_some());
        assert!(errors.get(Field::ConfirmPassword).is_some());
    }

    #[test]
    fn test_clear_field_error() {
        let mut errors = change("", "x", "x").validate().unwrap_err();
        errors.clear(Field::CurrentPassword);
        errors.clear(Field::NewPassword);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_contact_message_validation() {
        let mut msg = ContactMessage {
            name: "Ana".to_string(),
            email: "ana@x.org".to_string(),
            subject: "Demo".to_string(),
            message: "Please call me".to_string(),
        };
        assert!(msg.validate().is_ok());

        msg.subject = "   ".to_string();
        msg.email = "ana".to_string();
        let errors = msg.validate().unwrap_err();
        assert_eq!(errors.get(Field::Subject), Some("Subject is required"));
        assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address"));
        assert_eq!(errors.get(Field::Message), None);

        let errors = ContactMessage::default().validate().unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Message), Some("Message is required"));
    }
}
