use merit_core::validator::MeritListValidator;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: merit_validator <path/to/merit_list.json>");
        std::process::exit(2);
    }
    let path = std::path::Path::new(&args[1]);

    let v = MeritListValidator::new();
    match v.validate_file(path) {
        Ok(summary) => {
            match serde_json::to_string_pretty(&summary) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("validator error: {}", e);
                    std::process::exit(1);
                }
            }
            if summary.passed() {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("validator error: {}", e);
            std::process::exit(1);
        }
    }
}
