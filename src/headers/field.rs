/// Single header name and value pair.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: String,
    value: String,
}

impl HeaderField {
    #[inline]
    pub(crate) fn new(name: String, value: String) -> Self {
        Self { name, value }
    }

    /// Returns header name with its original casing.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub(crate) fn eq_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    #[inline]
    pub(crate) fn replace(&mut self, name: String, value: String) -> String {
        self.name = name;
        std::mem::replace(&mut self.value, value)
    }

    #[inline]
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl std::fmt::Debug for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}: {}\"", self.name, self.value)
    }
}
