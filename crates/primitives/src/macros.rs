pub(crate) mod internal {
    // Crate-internal impls for the fixed-size buffer types.

    /// Generates the foundational API for a fixed-size byte buffer type.
    ///
    /// Provides constructors (`new`, `zero`), accessors (`as_slice`, `as_bytes`,
    /// `is_zero`), the `LEN` constant, conversion traits and `Default`.
    macro_rules! impl_buf_core {
        ($name:ident, $len:expr) => {
            impl $name {
                pub const LEN: usize = $len;

                pub const fn new(data: [u8; $len]) -> Self {
                    Self(data)
                }

                pub const fn as_slice(&self) -> &[u8] {
                    &self.0
                }

                pub const fn as_bytes(&self) -> &[u8; $len] {
                    &self.0
                }

                pub const fn zero() -> Self {
                    Self::new([0; $len])
                }

                pub const fn is_zero(&self) -> bool {
                    let mut i = 0;
                    while i < $len {
                        if self.0[i] != 0 {
                            return false;
                        }
                        i += 1;
                    }
                    true
                }
            }

            impl ::std::convert::AsRef<[u8; $len]> for $name {
                fn as_ref(&self) -> &[u8; $len] {
                    &self.0
                }
            }

            impl ::std::convert::AsRef<[u8]> for $name {
                fn as_ref(&self) -> &[u8] {
                    &self.0
                }
            }

            impl ::std::convert::From<[u8; $len]> for $name {
                fn from(data: [u8; $len]) -> Self {
                    Self(data)
                }
            }

            impl ::std::convert::From<$name> for [u8; $len] {
                fn from(buf: $name) -> Self {
                    buf.0
                }
            }

            impl<'a> ::std::convert::TryFrom<&'a [u8]> for $name {
                type Error = &'a [u8];

                fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
                    <[u8; $len]>::try_from(value).map(Self).map_err(|_| value)
                }
            }

            impl ::std::default::Default for $name {
                fn default() -> Self {
                    Self::zero()
                }
            }
        };
    }

    /// Generates `Debug` (full hex) and `Display` (truncated hex) formatting.
    macro_rules! impl_buf_fmt {
        ($name:ident, $len:expr) => {
            impl ::std::fmt::Debug for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&::hex::encode(self.0))
                }
            }

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    // only the first and last bytes
                    write!(
                        f,
                        "{}..{}",
                        ::hex::encode(&self.0[..3]),
                        ::hex::encode(&self.0[$len - 3..])
                    )
                }
            }
        };
    }

    /// Generates `BorshSerialize` and `BorshDeserialize` impls as raw bytes.
    macro_rules! impl_buf_borsh {
        ($name:ident, $len:expr) => {
            impl ::borsh::BorshSerialize for $name {
                fn serialize<W: ::std::io::Write>(&self, writer: &mut W) -> ::std::io::Result<()> {
                    writer.write_all(&self.0)
                }
            }

            impl ::borsh::BorshDeserialize for $name {
                fn deserialize_reader<R: ::std::io::Read>(
                    reader: &mut R,
                ) -> ::std::io::Result<Self> {
                    let mut array = [0u8; $len];
                    reader.read_exact(&mut array)?;
                    Ok(Self(array))
                }
            }
        };
    }

    /// Generates `Arbitrary` impl for property-based testing.
    macro_rules! impl_buf_arbitrary {
        ($name:ident, $len:expr) => {
            impl<'a> ::arbitrary::Arbitrary<'a> for $name {
                fn arbitrary(u: &mut ::arbitrary::Unstructured<'a>) -> ::arbitrary::Result<Self> {
                    let mut array = [0u8; $len];
                    u.fill_buffer(&mut array)?;
                    Ok(Self(array))
                }
            }
        };
    }

    /// Generates hex `Serialize`/`Deserialize` for human-readable formats,
    /// accepting an optional `0x` prefix.
    macro_rules! impl_buf_serde {
        ($name:ident, $len:expr) => {
            impl ::serde::Serialize for $name {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: ::serde::Serializer,
                {
                    if serializer.is_human_readable() {
                        serializer.serialize_str(&::hex::encode(self.0))
                    } else {
                        serializer.serialize_bytes(&self.0)
                    }
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: ::serde::Deserializer<'de>,
                {
                    // Scoped to the fn so every invocation gets its own visitor.
                    struct BufVisitor;

                    impl<'de> ::serde::de::Visitor<'de> for BufVisitor {
                        type Value = $name;

                        fn expecting(
                            &self,
                            formatter: &mut ::std::fmt::Formatter<'_>,
                        ) -> ::std::fmt::Result {
                            write!(
                                formatter,
                                "a hex string with an optional 0x prefix representing {} bytes",
                                $len
                            )
                        }

                        fn visit_str<E>(self, v: &str) -> Result<$name, E>
                        where
                            E: ::serde::de::Error,
                        {
                            let hex_str = v
                                .strip_prefix("0x")
                                .or_else(|| v.strip_prefix("0X"))
                                .unwrap_or(v);
                            let bytes = ::hex::decode(hex_str).map_err(E::custom)?;
                            let array = <[u8; $len]>::try_from(bytes.as_slice()).map_err(|_| {
                                E::custom(format!("expected {} bytes, got {}", $len, bytes.len()))
                            })?;
                            Ok($name(array))
                        }

                        fn visit_bytes<E>(self, v: &[u8]) -> Result<$name, E>
                        where
                            E: ::serde::de::Error,
                        {
                            <[u8; $len]>::try_from(v)
                                .map($name)
                                .map_err(|_| E::invalid_length(v.len(), &self))
                        }

                        fn visit_seq<A>(self, mut seq: A) -> Result<$name, A::Error>
                        where
                            A: ::serde::de::SeqAccess<'de>,
                        {
                            let mut array = [0u8; $len];
                            for (i, slot) in array.iter_mut().enumerate() {
                                *slot = seq
                                    .next_element::<u8>()?
                                    .ok_or_else(|| ::serde::de::Error::invalid_length(i, &self))?;
                            }
                            if seq.next_element::<u8>()?.is_some() {
                                return Err(::serde::de::Error::custom(format!(
                                    "expected a sequence of exactly {} bytes",
                                    $len
                                )));
                            }
                            Ok($name(array))
                        }
                    }

                    if deserializer.is_human_readable() {
                        deserializer.deserialize_any(BufVisitor)
                    } else {
                        deserializer.deserialize_bytes(BufVisitor)
                    }
                }
            }
        };
    }

    pub(crate) use impl_buf_arbitrary;
    pub(crate) use impl_buf_borsh;
    pub(crate) use impl_buf_core;
    pub(crate) use impl_buf_fmt;
    pub(crate) use impl_buf_serde;
}
