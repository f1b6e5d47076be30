// ABOUTME: Symbol interning table — djb2 hash into a fixed slot count with
// ABOUTME: explicit chaining, guaranteeing one heap object per spelling

use crate::value::Symbol;
use std::rc::Rc;

/// An earlier revision of this interner sized its table at 8,191 slots while
/// computing the hash modulo a *different* constant, so two distinct
/// spellings could land in the same bucket and — because lookup trusted the
/// hash alone instead of comparing the stored text — the interner would
/// silently hand back the wrong symbol. The fix is the table size below and
/// the byte-for-byte comparison in `intern`; hashing only picks the bucket,
/// it never substitutes for equality.
pub const TABLE_SIZE: usize = 10_009;

/// djb2: `h = 5381; h = h * 33 + c` for each byte, folded into a bucket
/// index by the caller.
fn djb2(text: &str) -> u64 {
    let mut hash: u64 = 5381;
    for byte in text.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    hash
}

/// A fixed-size hash table of buckets, each a chain of previously interned
/// symbols. Collisions are resolved by walking the chain and comparing full
/// contents, never by hash value alone.
pub struct Interner {
    buckets: Vec<Vec<Symbol>>,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            buckets: (0..TABLE_SIZE).map(|_| Vec::new()).collect(),
        }
    }

    fn bucket_index(text: &str) -> usize {
        (djb2(text) % TABLE_SIZE as u64) as usize
    }

    /// Returns the canonical `Symbol` for `text`, creating and chaining it
    /// in if this is the first time this spelling has been seen.
    pub fn intern(&mut self, text: &str) -> Symbol {
        let idx = Self::bucket_index(text);
        let bucket = &mut self.buckets[idx];
        if let Some(existing) = bucket.iter().find(|s| s.as_ref() == text) {
            return Rc::clone(existing);
        }
        let sym: Symbol = Rc::from(text);
        bucket.push(Rc::clone(&sym));
        sym
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_spelling_is_same_object() {
        let mut interner = Interner::new();
        let a = interner.intern("define");
        let b = interner.intern("define");
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_spellings_are_distinct() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert!(!Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn collisions_do_not_confuse_distinct_symbols() {
        // Two spellings that happen to share a bucket must still compare
        // unequal and be interned as distinct symbols.
        let mut interner = Interner::new();
        let mut found_collision = false;
        'search: for a in 0u32..2000 {
            for b in (a + 1)..2000 {
                let sa = format!("sym{a}");
                let sb = format!("sym{b}");
                if Interner::bucket_index(&sa) == Interner::bucket_index(&sb) {
                    let ra = interner.intern(&sa);
                    let rb = interner.intern(&sb);
                    assert!(!Rc::ptr_eq(&ra, &rb));
                    assert_ne!(ra.as_ref(), rb.as_ref());
                    found_collision = true;
                    break 'search;
                }
            }
        }
        assert!(found_collision, "expected to find a bucket collision in the search space");
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(djb2("lambda"), djb2("lambda"));
    }
}
