use std::fmt;
use std::io;

use beserial::{Deserialize, Serialize};

/// A 64-byte validator/account identifying field.
///
/// Depending on the transaction kind this holds a sender, issuer, or
/// recipient public key, or (for `ConfigTx`) the signature field that doubles
/// as the identifying address for shard dispatch (see §4.4/§9 of the spec:
/// this is a known source-side quirk, not a mistake in this port).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Addr64(pub [u8; 64]);

/// A 64-byte signature field.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Sig64(pub [u8; 64]);

impl Addr64 {
    pub const fn zero() -> Self {
        Addr64([0u8; 64])
    }

    /// The big-endian u64 formed by the first 8 bytes, used by shard
    /// dispatch's modulo step.
    pub fn leading_u64(&self) -> u64 {
        u64::from_be_bytes(self.0[0..8].try_into().unwrap())
    }
}

impl From<[u8; 64]> for Addr64 {
    fn from(bytes: [u8; 64]) -> Self {
        Addr64(bytes)
    }
}

impl From<[u8; 64]> for Sig64 {
    fn from(bytes: [u8; 64]) -> Self {
        Sig64(bytes)
    }
}

impl fmt::Debug for Addr64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addr64({})", hex::encode(&self.0[0..8]))
    }
}

impl fmt::Debug for Sig64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig64({})", hex::encode(&self.0[0..8]))
    }
}

// beserial has no blanket impl for `[u8; 64]`, so both fixed-size fields get
// a direct raw-byte (de)serialization, matching how nimiq-keys hand-rolls
// (de)serialization for its own 64-byte public key type.
impl Serialize for Addr64 {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_all(&self.0)?;
        Ok(64)
    }

    fn serialized_size(&self) -> usize {
        64
    }
}

impl Deserialize for Addr64 {
    fn deserialize<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let mut bytes = [0u8; 64];
        reader.read_exact(&mut bytes)?;
        Ok(Addr64(bytes))
    }
}

impl Serialize for Sig64 {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_all(&self.0)?;
        Ok(64)
    }

    fn serialized_size(&self) -> usize {
        64
    }
}

impl Deserialize for Sig64 {
    fn deserialize<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let mut bytes = [0u8; 64];
        reader.read_exact(&mut bytes)?;
        Ok(Sig64(bytes))
    }
}
