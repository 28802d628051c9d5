use xexpr::{Compiler, Context, FieldRegistry};

fn main() {
    let rule = Compiler::new(FieldRegistry::standard())
        .compile("V={1205,1206} || E={abtest} || P={1}")
        .expect("failed to compile rule");

    let ctx = Context::new().set("V", 1206_i32).set("E", 7_i32);

    let report = rule.evaluate_detailed(&ctx);
    println!("{report}");
    for (field, outcome) in report.visited() {
        println!("  {field}: {outcome}");
    }
}
