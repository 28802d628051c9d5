use std::sync::Arc;
use std::thread;

use xexpr::{Compiler, Context, FieldRegistry};

const VERSIONS: [i32; 5] = [1208, 1206, 1209, 1205, 1207];

fn main() {
    let rule = Arc::new(
        Compiler::new(FieldRegistry::standard())
            .compile("V=(1206,1209] && P={1}  && A={1} && E={abtest}")
            .expect("failed to compile rule"),
    );

    let handles: Vec<_> = (0..10)
        .map(|t| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let mut matched = 0_usize;
                for i in 0..100_000_usize {
                    let flag = i32::from(i % 2 == 1);
                    let ctx = Context::new()
                        .set("V", VERSIONS[(i + t) % VERSIONS.len()])
                        .set("P", flag)
                        .set("A", flag)
                        .set("E", "abtest");
                    if rule.evaluate(&ctx) {
                        matched += 1;
                    }
                }
                matched
            })
        })
        .collect();

    for (t, h) in handles.into_iter().enumerate() {
        println!("Thread {t}: {} matches", h.join().unwrap());
    }
}
