//! Zero-padded row identifiers, 1-based.

pub fn customer_id(n: usize) -> String {
    format!("CUST_{:04}", n)
}

pub fn company_name(n: usize) -> String {
    format!("Company_{}", n)
}

pub fn subscription_id(n: usize) -> String {
    format!("SUB_{:05}", n)
}

pub fn event_id(n: usize) -> String {
    format!("EVT_{:07}", n)
}

pub fn touch_id(n: usize) -> String {
    format!("TCH_{:06}", n)
}

pub fn sales_rep(n: u32) -> String {
    format!("Rep_{:02}", n)
}
