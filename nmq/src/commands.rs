//! CLI command implementations.

use std::io::{self, Read};

use netql::{Config, Operation, OutputFormat, PlacementRule, QueryParser, OPERATOR_TABLE};

/// Read the query argument, falling back to stdin for `None` or `-`.
fn read_query(query: Option<&str>) -> netql::Result<String> {
    match query {
        Some(q) if q != "-" => Ok(q.to_string()),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Render a rule as indented text.
fn format_rule(rule: &PlacementRule) -> String {
    let mut out = format!("replication factor: {}\n", rule.replication_factor);
    for (i, group) in rule.groups.iter().enumerate() {
        out.push_str(&format!("group {}:\n", i + 1));
        for s in &group.selectors {
            out.push_str(&format!("  select {} {}\n", s.count, s.key));
        }
        for f in &group.filters {
            out.push_str(&format!("  filter {} {} {}\n", f.key, f.operation, f.value));
        }
    }
    out
}

/// Parse a query and print the resulting rule.
pub fn parse(config: &Config, query: Option<&str>, format: Option<&str>) -> netql::Result<()> {
    let format = match format {
        Some(f) => f.parse()?,
        None => config.format,
    };
    let text = read_query(query)?;
    let rule = QueryParser::from_config(config).parse(&text)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rule)?),
        OutputFormat::Text => print!("{}", format_rule(&rule)),
    }
    Ok(())
}

/// Check each query; returns whether all of them parsed.
pub fn check(config: &Config, queries: &[String], quiet: bool) -> netql::Result<bool> {
    let parser = QueryParser::from_config(config);
    let mut failed = 0usize;

    for query in queries {
        match parser.parse(query) {
            Ok(rule) => {
                if !quiet {
                    println!(
                        "ok     {} (RF {}, {} groups, {} selectors)",
                        query,
                        rule.replication_factor,
                        rule.groups.len(),
                        rule.selector_count()
                    );
                }
            }
            Err(e) => {
                failed += 1;
                if !quiet {
                    println!("error  {} ({})", query, e);
                }
            }
        }
    }

    if failed > 0 {
        tracing::info!(failed, total = queries.len(), "query check failed");
    }
    Ok(failed == 0)
}

/// List operators with every token that selects them.
pub fn ops() -> netql::Result<()> {
    for op in Operation::ALL {
        let tokens: Vec<&str> = OPERATOR_TABLE
            .iter()
            .filter(|(_, o)| *o == op)
            .map(|(token, _)| *token)
            .collect();
        println!("{:<4}{}", op.mnemonic(), tokens.join("  "));
    }
    Ok(())
}

/// Show quick reference for query syntax.
pub fn quick_help() -> netql::Result<()> {
    print!("{}", QUICK_HELP);
    Ok(())
}

/// Print the resolved configuration.
pub fn config_show(config: &Config) -> netql::Result<()> {
    println!("# {}", config.config_path().display());
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write a default config file.
pub fn config_init(config: &Config, force: bool) -> netql::Result<()> {
    let path = config.config_path();
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults");
        return Ok(());
    }

    Config::with_root(&config.netql_root).save()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

const QUICK_HELP: &str = r#"
NMQ QUICK REFERENCE
===================

COMMANDS                                    EXAMPLES
────────────────────────────────────────────────────────────────────────────────
parse (p)          Parse and print a rule   nmq p "SELECT 1 Country"
check (c)          Validate queries         nmq c "SELECT 1 a" "SELECT 2 b"
ops                List filter operators    nmq ops
config             Show/create config       nmq config show

QUERY SYNTAX: [RF n] SELECT n key ... [FILTER key op value ...] [; SELECT ...]
────────────────────────────────────────────────────────────────────────────────
RF            RF 3        Replication factor (default: 2)

SELECT        1 Country   One node per Country
              2 City      Two nodes grouped by City

FILTER        Location NE Europe    Exclude Europe
              Trust >= 10           Numeric values are compared by the consumer

UNION         ;           Separates selection groups

OPERATORS     EQ =    NE !=    LT <    LE <=    GT >    GE >=

EXAMPLES
────────────────────────────────────────────────────────────────────────────────
SELECT 1 Country
RF 4 SELECT 1 Country 2 City FILTER Location NE Europe
SELECT 1 Country FILTER Country NE Russia ; SELECT 1 Country FILTER Country EQ Germany

"#;
