use polars::prelude::*;
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let df = CsvReader::from_path("Emails.csv")?
        .infer_schema(None)
        .finish()?;

    let new_df = df.select(&["MetadataFrom", "MetadataTo"])?;

    // Drop rows missing either endpoint
    let mask = new_df.column("MetadataFrom")?.is_not_null()
        & new_df.column("MetadataTo")?.is_not_null();
    let mut new_df = new_df.filter(&mask)?;

    new_df.rename("MetadataFrom", "from")?;
    new_df.rename("MetadataTo", "to")?;

    // print the first 5 rows
    println!("{:?}", new_df.head(Some(5)));

    // Write to CSV
    let mut file = File::create("emails_cleaned.csv")?;
    CsvWriter::new(&mut file).finish(&mut new_df)?;

    Ok(())
}
