use xexpr::{Compiler, Context, FieldRegistry};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let compiler = Compiler::new(FieldRegistry::standard());
    let rule = compiler
        .compile("V=(1206,1209] && P={1} && A={1} && E={abtest}")
        .expect("failed to compile rule");

    let ctx = Context::new()
        .set("V", 1207_i32)
        .set("P", 1_i32)
        .set("A", 1_i32)
        .set("E", "abtest");
    println!("{} -> {}", rule, rule.evaluate(&ctx));

    let ctx = ctx.set("V", 1206_i32);
    println!("{} -> {}", rule, rule.evaluate(&ctx));

    // Run with RUST_LOG=xexpr=debug to see why these are rejected.
    for bad in ["V=(1,2] && P={1} || A={1}", "Z=(1,2]", "V=(1,2}"] {
        match compiler.compile(bad) {
            Ok(_) => println!("{bad}: compiled"),
            Err(e) => println!("{bad}: {e}"),
        }
    }
}
