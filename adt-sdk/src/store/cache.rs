/// A storage slot loaded during the current call.
#[derive(Clone, Debug)]
pub(crate) struct CacheEntry<T> {
    value: Option<T>,
    state: EntryState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EntryState {
    /// Same as the storage.
    Loaded,
    /// Differs from the storage until the next flush.
    Modified,
}

impl<T> CacheEntry<T> {
    pub fn loaded(value: Option<T>) -> Self {
        Self {
            value,
            state: EntryState::Loaded,
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Replaces the value and returns the previous one. Replacing a missing value with
    /// `None` doesn't mark the entry as modified.
    pub fn replace(&mut self, value: Option<T>) -> Option<T> {
        let old_value = core::mem::replace(&mut self.value, value);

        if self.value.is_some() || old_value.is_some() {
            self.state = EntryState::Modified;
        }

        old_value
    }

    pub fn is_modified(&self) -> bool {
        self.state == EntryState::Modified
    }

    pub fn mark_flushed(&mut self) {
        self.state = EntryState::Loaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_marks_modified() {
        let mut entry = CacheEntry::loaded(None::<u8>);
        assert!(!entry.is_modified());

        assert_eq!(entry.replace(None), None);
        assert!(!entry.is_modified());

        assert_eq!(entry.replace(Some(1)), None);
        assert!(entry.is_modified());

        entry.mark_flushed();
        assert_eq!(entry.replace(None), Some(1));
        assert!(entry.is_modified());
        assert_eq!(entry.value(), None);
    }
}
