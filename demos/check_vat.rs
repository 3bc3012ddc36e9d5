use std::time::Duration;

use vies::{VatQuery, ViesClient};

#[tokio::main]
async fn main() {
    // Input validation happens locally — no network needed for these
    println!("=== Query Validation ===\n");

    let inputs = [
        ("DE", "123456789"),
        ("el", "123456789"), // Greece: VIES wants "EL", lowercase is fine
        ("GR", "123456789"), // rejected — ISO code, not the VIES one
        ("US", "123456789"), // rejected — not an EU member state
        ("DE", ""),          // rejected — empty number
    ];

    for (cc, num) in &inputs {
        match VatQuery::new(cc, num) {
            Ok(q) => println!("  {cc} {num} => ok ({}{})", q.country_code(), q.vat_number()),
            Err(e) => println!("  {cc} {num:?} => {e}"),
        }
    }

    // Live check against VIES (requires network access)
    println!("\n=== VIES Lookup ===\n");

    let client = match ViesClient::builder()
        .timeout(Duration::from_secs(15))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("  client setup failed: {e}");
            return;
        }
    };

    match client.check_vat("DE", "811569869").await {
        Ok(result) => {
            println!("  valid:        {}", result.valid);
            println!("  country code: {}", result.country_code);
            println!("  vat number:   {}", result.vat_number);
            println!("  name:         {}", result.name);
            println!("  address:      {}", result.address.replace('\n', " / "));
            println!("  request date: {}", result.request_date);
        }
        Err(e) => eprintln!("  lookup failed: {e}"),
    }
}
