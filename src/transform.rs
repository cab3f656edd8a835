use crate::dependency::{Dependency, Tgd};
use crate::error::SchemaError;
use crate::schema::DependencySchema;
use crate::Atom;

/// A rewriting pass: takes a schema and produces a new, equally valid one.
pub trait Transform {
    fn transform(&self, schema: &DependencySchema) -> Result<DependencySchema, SchemaError>;
}

/// Splits every TGD head into groups of atoms linked by shared existential
/// variables; each group becomes a TGD of its own with the original body.
pub struct SplitHeads;

impl Transform for SplitHeads {
    fn transform(&self, schema: &DependencySchema) -> Result<DependencySchema, SchemaError> {
        let mut builder = schema.to_builder();
        for dependency in schema.dependencies() {
            match dependency {
                Dependency::Tgd(tgd) => {
                    for part in split_head(tgd)? {
                        builder.dependency(part);
                    }
                }
                Dependency::Egd(egd) => {
                    builder.dependency(egd.clone());
                }
            }
        }
        builder.build()
    }
}

fn split_head(tgd: &Tgd) -> Result<Vec<Tgd>, SchemaError> {
    let existential = tgd.existential_variables();
    let head = tgd.head();
    let shares_existential = |a: &Atom, b: &Atom| {
        a.variables().any(|v| existential.contains(&v) && b.variables().any(|w| w == v))
    };

    // connected components, in order of their first atom
    let mut component = vec![usize::MAX; head.len()];
    let mut count = 0;
    for start in 0..head.len() {
        if component[start] != usize::MAX {
            continue;
        }
        let mut stack = vec![start];
        component[start] = count;
        while let Some(i) = stack.pop() {
            for j in 0..head.len() {
                if component[j] == usize::MAX && shares_existential(&head[i], &head[j]) {
                    component[j] = count;
                    stack.push(j);
                }
            }
        }
        count += 1;
    }
    if count == 1 {
        return Ok(vec![tgd.clone()]);
    }
    (0..count)
        .map(|c| {
            let atoms = head
                .iter()
                .zip(&component)
                .filter(|(_, &k)| k == c)
                .map(|(a, _)| a.clone())
                .collect();
            Tgd::new(tgd.body().clone(), atoms)
        })
        .collect()
}
