use sheetbook_db::Row;
use sheetbook_domain::Transaction;

macro_rules! next_attr {
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Transaction {
    fn print_formatted(&self) {
        println!("ID:\t\t\t{}", self.id);
        println!("Date:\t\t\t{}", self.date);
        println!("Type:\t\t\t{}", self.kind);
        println!("Partner:\t\t{}", self.partner);
        println!("Description:\t\t{}", self.description);
        println!("Amount:\t\t\t{:.2}", self.amount);
        println!("Created:\t\t{}", self.created_at);
        println!("Updated:\t\t{}", self.updated_at);
    }
}

impl PrintFormatted for (Transaction, Transaction) {
    fn print_formatted(&self) {
        let (old, new) = self;

        println!("ID:\t\t\t{}", old.id);
        let next_date = next_attr!(old, new, date);
        println!("Date:\t\t\t{}{}", old.date, next_date);
        let next_kind = next_attr!(old, new, kind);
        println!("Type:\t\t\t{}{}", old.kind, next_kind);
        let next_partner = next_attr!(old, new, partner);
        println!("Partner:\t\t{}{}", old.partner, next_partner);
        let next_description = next_attr!(old, new, description);
        println!("Description:\t\t{}{}", old.description, next_description);
        let next_amount = next_attr!(old, new, amount);
        println!("Amount:\t\t\t{}{}", old.amount, next_amount);
        let next_updated = next_attr!(old, new, updated_at);
        println!("Updated:\t\t{}{}", old.updated_at, next_updated);
    }
}

impl PrintFormatted for Vec<Transaction> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<12}\t{:<10}\t{:<24}\t{:>12}\t{}",
            "ID", "Date", "Type", "Partner", "Amount", "Description"
        );
        println!("{:-<120}", "-");
        for tx in self {
            println!(
                "{:>4}\t{:<12}\t{:<10}\t{:<24}\t{:>12.2}\t{}",
                tx.id, tx.date, tx.kind, tx.partner, tx.amount, tx.description
            );
        }
    }
}

impl PrintFormatted for Vec<Row> {
    fn print_formatted(&self) {
        for (i, row) in self.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|cell| cell.display()).collect();
            println!("{:>4}\t{}", i + 1, cells.join("\t"));
        }
    }
}
