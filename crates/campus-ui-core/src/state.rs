/// How the data on screen for a section came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLoadState {
    /// Skeleton written, fetch outstanding.
    Loading,
    /// Fetch succeeded with nothing to list.
    LoadedEmpty,
    LoadedReal,
    /// Fetch failed; the section shows its sample dataset or failure notice.
    FetchFailed,
    /// Section has no backend data.
    Static,
}

impl SectionLoadState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::LoadedEmpty => "empty",
            Self::LoadedReal => "live",
            Self::FetchFailed => "fetch-failed",
            Self::Static => "static",
        }
    }

    pub fn from_list_len(len: usize) -> Self {
        if len == 0 {
            Self::LoadedEmpty
        } else {
            Self::LoadedReal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_length_decides_between_empty_and_live() {
        assert_eq!(SectionLoadState::from_list_len(0), SectionLoadState::LoadedEmpty);
        assert_eq!(SectionLoadState::from_list_len(2), SectionLoadState::LoadedReal);
    }
}
