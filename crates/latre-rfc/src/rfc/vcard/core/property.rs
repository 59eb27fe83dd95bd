//! vCard property names.

/// Property names the codec and the merge engine refer to.
pub mod names {
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const PHOTO: &str = "PHOTO";
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const REV: &str = "REV";
    pub const UID: &str = "UID";
    pub const VERSION: &str = "VERSION";
}
