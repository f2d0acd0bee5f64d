/// Named color slot on a paint resource.
///
/// Backends address paint colors by channel name; the name strings are part of
/// the native contract and must not change.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ColorChannel {
    /// Base surface color. This is the channel background colors are written to.
    #[default]
    Diffuse,
}

impl ColorChannel {
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            ColorChannel::Diffuse => "diffuseColor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_channel_is_diffuse() {
        assert_eq!(ColorChannel::default(), ColorChannel::Diffuse);
        assert_eq!(ColorChannel::Diffuse.name(), "diffuseColor");
    }
}
