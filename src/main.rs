use deplog::*;
use std::time::{Duration, Instant};

fn stdin_to_string() -> String {
    use std::io::Read as _;
    let mut buffer = String::new();
    std::io::stdin().lock().read_to_string(&mut buffer).expect("stdin is not utf-8?");
    buffer
}

fn timed<R>(func: impl FnOnce() -> R) -> (Duration, R) {
    let start = Instant::now();
    let r = func();
    (start.elapsed(), r)
}

fn verdict(name: &str, result: Result<bool, AnalysisError>) {
    match result {
        Ok(v) => println!("{name}: {v}"),
        Err(e) => println!("{name}: unknown ({e})"),
    }
}

fn main() {
    let source = stdin_to_string();
    let schema = match schema_from_text(&source) {
        Ok(schema) => schema,
        Err(SchemaError::Parse(e)) => return println!("PARSE ERROR\n{e}"),
        Err(e) => return println!("SCHEMA ERROR {e}"),
    };
    println!("SCHEMA:\n{}", Pretty::new(&schema, &schema));

    let analysis = analyze_egds(schema.egds());
    for f in &analysis.functional {
        let fd = &f.fd;
        println!(
            "FD {}: {:?} -> {:?} (key: {}, from {} egds)",
            Pretty::new(&fd.predicate(), &schema),
            fd.key(),
            fd.determined(),
            fd.is_key_dependency(),
            f.sources.len(),
        );
    }
    for egd in &analysis.other {
        println!("OTHER EGD {}", Pretty::new(egd, &schema));
    }
    println!("non-conflicting: {}", egds_are_non_conflicting(&schema));

    let (dur, ()) = timed(|| {
        verdict("linear", is_linear(&schema));
        verdict("guarded", is_guarded(&schema));
        verdict("weakly guarded", is_weakly_guarded(&schema));
        verdict("sticky", is_sticky(&schema));
    });
    println!("Language checks took {dur:?}");
}
