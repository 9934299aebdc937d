//! Value Object Module

pub mod identity;
pub mod otp_code;

pub use identity::Identity;
pub use otp_code::OtpCode;
