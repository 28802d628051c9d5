use xexpr::{Compiler, Context, FieldRegistry};

const SCHEMA: &str = r"
# Fields a checkout experiment can target on.
app_version : uint32
country     : string
basket      : double
";

fn main() {
    let registry = FieldRegistry::from_schema(SCHEMA).expect("invalid schema");
    let mut fields: Vec<_> = registry.iter().collect();
    fields.sort_unstable_by_key(|(name, _)| *name);
    for (name, ty) in fields {
        println!("{name}: {ty}");
    }
    println!("targets country: {}", registry.contains("country"));

    let compiler = Compiler::new(registry);

    let rule = compiler
        .compile("app_version=[500,600) && country={de,fr,nl} && basket=(20,500]")
        .expect("failed to compile rule");

    let ctx = Context::new()
        .set("app_version", 512_u32)
        .set("country", "nl")
        .set("basket", 42.5_f64);
    if let Some(tree) = rule.tree() {
        println!("{tree}: {}", rule.evaluate(&ctx));
    }
}
