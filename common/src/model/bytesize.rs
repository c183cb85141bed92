use bytesize::ByteSize;
use std::{
    fmt::{Display, Formatter},
    ops::Deref,
    str::FromStr,
};

/// A [`ByteSize`] which renders itself using binary units.
///
/// Rendering and parsing back yields the same value, which is required for using it as a default
/// value of command line arguments.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash, Default)]
pub struct BinaryByteSize(pub ByteSize);

impl From<ByteSize> for BinaryByteSize {
    fn from(value: ByteSize) -> Self {
        Self(value)
    }
}

impl From<usize> for BinaryByteSize {
    fn from(value: usize) -> Self {
        Self(ByteSize(value as u64))
    }
}

impl From<BinaryByteSize> for usize {
    fn from(value: BinaryByteSize) -> Self {
        value.0 .0 as usize
    }
}

impl Deref for BinaryByteSize {
    type Target = ByteSize;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for BinaryByteSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_string_as(true))
    }
}

impl FromStr for BinaryByteSize {
    type Err = <ByteSize as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ByteSize::from_str(s).map(BinaryByteSize)
    }
}
