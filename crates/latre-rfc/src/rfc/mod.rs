pub mod filter;
pub mod vcard;
