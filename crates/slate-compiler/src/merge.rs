use bson::{Bson, Document};

/// Merge `source` into `target`.
///
/// Same-keyed documents merge recursively and same-keyed arrays
/// concatenate, which is how repeated `$and`/`$or` fragments accumulate
/// into one condition list. Any other collision keeps both values as a
/// two-element array, left first.
pub fn deep_merge(target: &mut Document, source: Document) {
    for (key, incoming) in source {
        match target.get_mut(&key) {
            Some(existing) => merge_value(existing, incoming),
            None => {
                target.insert(key, incoming);
            }
        }
    }
}

fn merge_value(existing: &mut Bson, incoming: Bson) {
    match (existing, incoming) {
        (Bson::Document(left), Bson::Document(right)) => deep_merge(left, right),
        (Bson::Array(left), Bson::Array(right)) => left.extend(right),
        (Bson::Array(left), scalar) => left.push(scalar),
        (slot, incoming) => {
            let previous = std::mem::replace(slot, Bson::Null);
            *slot = match incoming {
                Bson::Array(mut right) => {
                    right.insert(0, previous);
                    Bson::Array(right)
                }
                other => Bson::Array(vec![previous, other]),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn disjoint_keys_append() {
        let mut target = doc! { "a": 1 };
        deep_merge(&mut target, doc! { "b": 2 });
        assert_eq!(target, doc! { "a": 1, "b": 2 });
    }

    #[test]
    fn arrays_concatenate() {
        let mut target = doc! { "$and": [{ "a": 1 }] };
        deep_merge(&mut target, doc! { "$and": [{ "b": 2 }] });
        deep_merge(&mut target, doc! { "$or": [{ "c": 3 }] });
        deep_merge(&mut target, doc! { "$and": [{ "d": 4 }] });
        assert_eq!(
            target,
            doc! {
                "$and": [{ "a": 1 }, { "b": 2 }, { "d": 4 }],
                "$or": [{ "c": 3 }],
            }
        );
    }

    #[test]
    fn documents_merge_recursively() {
        let mut target = doc! { "age": { "$gt": 1 } };
        deep_merge(&mut target, doc! { "age": { "$lt": 9 } });
        assert_eq!(target, doc! { "age": { "$gt": 1, "$lt": 9 } });
    }

    #[test]
    fn scalar_collisions_keep_both() {
        let mut target = doc! { "a": 1 };
        deep_merge(&mut target, doc! { "a": 2 });
        assert_eq!(target, doc! { "a": [1, 2] });

        let mut target = doc! { "a": [1] };
        deep_merge(&mut target, doc! { "a": 2 });
        assert_eq!(target, doc! { "a": [1, 2] });

        let mut target = doc! { "a": 0 };
        deep_merge(&mut target, doc! { "a": [1, 2] });
        assert_eq!(target, doc! { "a": [0, 1, 2] });
    }
}
