//! Subject and body builders for purchase emails.

use folio_core::purchase::BookType;

/// Everything the purchase emails need to say, assembled by the caller from
/// the gateway's verified transaction data.
#[derive(Debug, Clone)]
pub struct PurchaseMail {
    pub reference: String,
    pub email: String,
    pub book_type: BookType,
    /// Amount in gateway minor units (pesewas).
    pub amount_minor: i64,
    pub currency: String,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
    /// Present for digital purchases only.
    pub download_url: Option<String>,
}

impl PurchaseMail {
    fn amount_display(&self) -> String {
        format!(
            "{} {}.{:02}",
            self.currency,
            self.amount_minor / 100,
            self.amount_minor % 100
        )
    }

    fn greeting_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("reader")
    }
}

/// Buyer-facing confirmation: subject and plain-text body.
pub fn purchase_confirmation(mail: &PurchaseMail) -> (String, String) {
    let subject = "Your purchase of The Psychology of Sustainable Wealth".to_string();

    let mut body = format!(
        "Hi {},\n\nThank you for your purchase!\n\nOrder reference: {}\nAmount: {}\n",
        mail.greeting_name(),
        mail.reference,
        mail.amount_display(),
    );

    match (&mail.download_url, mail.book_type) {
        (Some(url), _) => {
            body.push_str(&format!(
                "\nYour download link (valid for 24 hours):\n{url}\n\n\
                 If the link expires before you download, just reply to this \
                 email and we will send a fresh one.\n"
            ));
        }
        (None, BookType::Hardcopy) => {
            body.push_str(
                "\nWe will contact you shortly to arrange delivery of your \
                 hardcopy book to the address you provided.\n",
            );
            if let Some(address) = &mail.delivery_address {
                body.push_str(&format!("\nDelivery address on file:\n{address}\n"));
            }
        }
        (None, _) => {}
    }

    body.push_str("\nWarm regards,\nKofi\n");
    (subject, body)
}

/// Internal notification sent to each configured admin address.
pub fn admin_purchase_notification(mail: &PurchaseMail) -> (String, String) {
    let subject = format!(
        "New {} purchase — {}",
        mail.book_type.as_str(),
        mail.reference
    );

    let mut body = format!(
        "New purchase recorded.\n\n\
         Reference: {}\n\
         Buyer: {}\n\
         Type: {}\n\
         Amount: {}\n",
        mail.reference,
        mail.email,
        mail.book_type.as_str(),
        mail.amount_display(),
    );

    if let Some(name) = &mail.customer_name {
        body.push_str(&format!("Name: {name}\n"));
    }
    if let Some(phone) = &mail.phone {
        body.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(address) = &mail.delivery_address {
        body.push_str(&format!("Delivery address: {address}\n"));
    }

    (subject, body)
}
