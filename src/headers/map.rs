use super::{HeaderField, Iter};

/// HTTP Headers Multimap.
///
/// Fields are kept in insertion order with the casing they were given, name lookup is
/// case-insensitive. A request carries a handful of headers, so lookup is a linear scan.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: Vec<HeaderField>,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create new empty [`HeaderMap`] with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { fields: Vec::with_capacity(capacity) }
    }

    /// Returns headers length.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if headers has no field.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of the first field with given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|e| e.eq_name(name)).map(HeaderField::value)
    }

    /// Returns every value of fields with given name.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter().filter(move |e| e.eq_name(name)).map(HeaderField::value)
    }

    /// Returns `true` if the map contains a header value for given name.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.iter().any(|e| e.eq_name(name))
    }

    /// Returns `true` if any field with given name contains `token` in its comma separated
    /// value list, compared case-insensitively.
    ///
    /// ```
    /// use tinyweb::headers::HeaderMap;
    ///
    /// let mut map = HeaderMap::new();
    /// map.insert("Connection", "Upgrade, Close");
    /// assert!(map.has_token("connection", "close"));
    /// assert!(!map.has_token("connection", "keep-alive"));
    /// ```
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        self.get_all(name)
            .flat_map(|e| e.split(','))
            .any(|e| e.trim().eq_ignore_ascii_case(token))
    }

    /// Insert a header field, replacing the first field with the same name.
    ///
    /// Other fields with the same name are removed. Returns the replaced value.
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();

        let Some(idx) = self.fields.iter().position(|e| e.eq_name(&name)) else {
            self.fields.push(HeaderField::new(name, value));
            return None;
        };

        let mut i = idx + 1;
        while i < self.fields.len() {
            if self.fields[i].eq_name(&name) {
                self.fields.remove(i);
            } else {
                i += 1;
            }
        }

        Some(self.fields[idx].replace(name, value))
    }

    /// Append a header field, keeping existing fields with the same name.
    #[inline]
    pub fn append<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.push(HeaderField::new(name.into(), value.into()));
    }

    /// Remove every field with given name, returns the first removed value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let mut removed = None;
        let mut i = 0;
        while i < self.fields.len() {
            if self.fields[i].eq_name(name) {
                let (_, value) = self.fields.remove(i).into_parts();
                removed.get_or_insert(value);
            } else {
                i += 1;
            }
        }
        removed
    }

    /// Returns an iterator over name and value pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.fields)
    }

    /// Clears the map, removing all fields while keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.append(name, value);
        }
        map
    }
}

impl std::fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
