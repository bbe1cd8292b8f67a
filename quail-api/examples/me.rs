use quail_api::{Client, QuailApiError, Request, DEFAULT_API_BASE};

#[tokio::main]
pub async fn main() -> Result<(), QuailApiError> {
    let client = Client::new(DEFAULT_API_BASE, "access_token");

    let req = Request::users().me();

    let res = client.send(req).await?;
    println!("{}", res.data.name);
    Ok(())
}
