mod block_cipher;
mod hmac;

pub(crate) use self::hmac::PayloadMac;
pub(crate) use block_cipher::decrypt_cbc;
