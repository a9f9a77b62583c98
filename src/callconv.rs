//! Calling-convention enumeration, the `cc` keyword on `fntype`.

/// A calling convention. `Unspecified` is the schema default for `fntype`'s
/// `cc` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallingConv {
    Unspecified,
    C,
    Naked,
    Inline,
    Async,
}

impl CallingConv {
    pub const ALL: &'static [CallingConv] = &[
        CallingConv::Unspecified,
        CallingConv::C,
        CallingConv::Naked,
        CallingConv::Inline,
        CallingConv::Async,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CallingConv::Unspecified => "Unspecified",
            CallingConv::C => "C",
            CallingConv::Naked => "Naked",
            CallingConv::Inline => "Inline",
            CallingConv::Async => "Async",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|cc| cc.name() == name)
    }
}

impl Default for CallingConv {
    fn default() -> Self {
        CallingConv::Unspecified
    }
}

impl core::fmt::Display for CallingConv {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unspecified() {
        assert_eq!(CallingConv::default(), CallingConv::Unspecified);
    }

    #[test]
    fn every_variant_round_trips_through_its_name() {
        for cc in CallingConv::ALL {
            assert_eq!(CallingConv::from_name(cc.name()), Some(*cc));
        }
    }
}
