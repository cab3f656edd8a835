use core::fmt::{Debug, Display, Formatter};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

type TextIndex = u32;

/// Interned name of a variable, constant, predicate or custom operator.
/// Equal names share one index, so comparing and hashing is one integer op.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub struct Text(TextIndex);

#[derive(Default)]
struct TextMap {
    val_to_idx: HashMap<&'static str, TextIndex>,
    idx_to_val: Vec<&'static str>,
}

impl TextMap {
    fn insert_str(&mut self, val: &str) -> TextIndex {
        if let Some(&idx) = self.val_to_idx.get(val) {
            idx
        } else {
            let idx = TextIndex::try_from(self.idx_to_val.len()).expect("text table overflow");
            // entries live as long as the table, which is never dropped
            let val: &'static str = Box::leak(val.to_owned().into_boxed_str());
            self.val_to_idx.insert(val, idx);
            self.idx_to_val.push(val);
            idx
        }
    }
    fn get_str(&self, idx: TextIndex) -> &'static str {
        self.idx_to_val[idx as usize]
    }
}

static TEXT_MAP: OnceLock<RwLock<TextMap>> = OnceLock::new();

fn text_map() -> &'static RwLock<TextMap> {
    TEXT_MAP.get_or_init(Default::default)
}

impl Text {
    pub fn new(s: &str) -> Self {
        {
            let map = text_map().read().expect("poisoned");
            if let Some(&idx) = map.val_to_idx.get(s) {
                return Self(idx);
            }
        }
        let map: &mut TextMap = &mut text_map().write().expect("poisoned");
        Self(map.insert_str(s))
    }
    pub fn as_str(self) -> &'static str {
        text_map().read().expect("poisoned").get_str(self.0)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Debug for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn interning_is_stable() {
    let a = Text::new("employee");
    let b = Text::from("employee");
    assert_eq!(a, b);
    assert_ne!(a, Text::new("department"));
    assert_eq!(a.as_str(), "employee");
}
