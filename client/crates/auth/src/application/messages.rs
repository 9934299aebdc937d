//! User-Facing Messages
//!
//! Texts rendered in the auth panel. Remote rejections show the server's
//! own message when one exists; these are the local-validation texts and
//! the per-operation fallbacks.

pub const EMAIL_REQUIRED: &str = "メールアドレスを入力してください。";
pub const PASSWORD_REQUIRED: &str = "パスワードを入力してください。";
pub const PASSWORD_MISMATCH: &str = "パスワードが一致しません。";

pub const OTP_SENT: &str = "認証コードを送信しました。メールをご確認ください。";
pub const OTP_SEND_FAILED: &str = "認証コードの送信に失敗しました。再度お試しください。";
pub const OTP_CODE_REQUIRED: &str = "メールに届いた認証コードを入力してください。";
pub const OTP_NOT_READY: &str = "認証コードを送信してから再度お試しください。";
pub const OTP_VERIFY_FAILED: &str = "OTPでの認証に失敗しました。";

pub const SIGN_IN_FAILED: &str = "ログインに失敗しました。メールアドレスとパスワードをご確認ください。";
pub const SIGN_UP_FAILED: &str = "アカウント作成に失敗しました。再度お試しください。";
