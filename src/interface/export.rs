use std::path::Path;

use crate::error::Result;
use crate::models::ShoppingList;

/// Write the shopping list to a CSV file, one row per item.
pub fn write_shopping_list_csv(list: &ShoppingList, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["name", "units", "packs", "cost", "purchased"])?;

    for item in &list.items {
        wtr.write_record([
            item.name.clone(),
            format!("{:.2}", item.units),
            item.packs.to_string(),
            format!("{:.2}", item.cost),
            item.purchased.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShoppingListItem;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_rows() {
        let list = ShoppingList::new(vec![
            ShoppingListItem {
                name: "Carrot".to_string(),
                units: 1.0,
                packs: 1,
                cost: 0.17,
                purchased: false,
            },
            ShoppingListItem {
                name: "Egg, free range".to_string(),
                units: 9.0,
                packs: 2,
                cost: 3.6,
                purchased: true,
            },
        ]);

        let file = NamedTempFile::new().unwrap();
        write_shopping_list_csv(&list, file.path()).unwrap();

        let mut rdr = csv::Reader::from_path(file.path()).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "0.17");
        assert_eq!(&rows[1][0], "Egg, free range");
        assert_eq!(&rows[1][2], "2");
        assert_eq!(&rows[1][4], "true");
    }
}
