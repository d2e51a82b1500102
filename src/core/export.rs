use crate::domain::model::Customer;
use crate::utils::error::Result;
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = ["id", "firstName", "lastName", "address", "discount"];

pub fn write_csv<W: Write>(customers: &[Customer], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for customer in customers {
        let id = customer.id.to_string();
        csv_writer.write_record([
            id.as_str(),
            customer.first_name.as_str(),
            customer.last_name.as_str(),
            customer.address.as_str(),
            customer.discount.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(customers: &[Customer]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(customers, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
