//! String validators.
//!
//! Each validator takes the raw value and its options struct, checks the
//! options first, then runs an ordered [`RuleSet`](crate::rules::RuleSet)
//! where the first failing rule decides the message.

pub mod document;
pub mod email;
pub mod name;
pub mod password;
pub mod phone;
pub mod textarea;
pub mod username;

pub use document::{
    DOCUMENT_DEFAULT_MESSAGES, DocumentCode, DocumentOptions, DocumentSlot, validate_document,
};
pub use email::{
    DEFAULT_ALLOWED_DOMAINS, DomainPolicy, EMAIL_DEFAULT_MESSAGES, EmailOptions, EmailSlot,
    validate_email,
};
pub use name::{
    NAME_DEFAULT_MESSAGES, NameOptions, NameSlot, SURNAME_DEFAULT_MESSAGES, validate_name,
    validate_surname,
};
pub use password::{
    CharClass, PASSWORD_DEFAULT_MESSAGES, PasswordOptions, PasswordSlot, PasswordStrength,
    UnknownCharClass, password_strength, validate_password,
};
pub use phone::{PHONE_DEFAULT_MESSAGES, PhoneOptions, PhoneSlot, validate_phone};
pub use textarea::{TEXTAREA_DEFAULT_MESSAGES, TextareaOptions, TextareaSlot, validate_textarea};
pub use username::{USERNAME_DEFAULT_MESSAGES, UsernameOptions, UsernameSlot, validate_username};
