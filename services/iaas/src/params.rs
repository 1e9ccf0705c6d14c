// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use qingsign_core::time::{format_iso8601, DateTime};

/// A single parameter value, already rendered as the string that gets signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamValue(String);

impl ParamValue {
    /// Borrow the rendered value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue(v.clone())
    }
}

/// Timestamps are always sent as `yyyy-MM-ddTHH:mm:ssZ`.
impl From<DateTime> for ParamValue {
    fn from(v: DateTime) -> Self {
        ParamValue(format_iso8601(v))
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    ParamValue(v.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Flags are sent as `1` or `0`.
impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue(if v { "1" } else { "0" }.to_string())
    }
}

/// ParameterSet is the flat set of query parameters a request is signed over.
///
/// Keys are unique and kept in byte-wise order, which is the order the
/// canonical query string needs. Insertion order never matters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<String> {
        self.params.insert(key.into(), value.into().0)
    }

    /// Insert a list as `prefix.1`, `prefix.2`, ...
    ///
    /// ```
    /// use qingsign_iaas::ParameterSet;
    ///
    /// let mut params = ParameterSet::new();
    /// params.insert_list("instances", ["i-1234abcd", "i-5678efgh"]);
    ///
    /// assert_eq!(params.get("instances.1"), Some("i-1234abcd"));
    /// assert_eq!(params.get("instances.2"), Some("i-5678efgh"));
    /// ```
    pub fn insert_list<I, V>(&mut self, prefix: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        for (idx, value) in values.into_iter().enumerate() {
            self.insert(format!("{prefix}.{}", idx + 1), value);
        }
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Whether the parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over parameters in canonical (byte-wise) order.
    pub fn iter(&self) -> ParameterIter<'_> {
        ParameterIter(self.params.iter())
    }
}

/// Iterator over a [`ParameterSet`] in canonical order.
#[derive(Debug, Clone)]
pub struct ParameterIter<'a>(btree_map::Iter<'a, String, String>);

impl<'a> Iterator for ParameterIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a str, &'a str);
    type IntoIter = ParameterIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = ParameterSet::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
