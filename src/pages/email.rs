//! Access-code email body.

use leptos::prelude::*;

pub fn access_code_email(email: &str, code: &str) -> String {
    let prompt = format!("Use this code to sign in as {email}:");
    let code = code.to_owned();
    format!("<!DOCTYPE html>{}", view! { <AccessCodeEmail prompt=prompt code=code/> }.to_html())
}

#[component]
fn AccessCodeEmail(prompt: String, code: String) -> impl IntoView {
    view! {
        <html>
            <body style="font-family: -apple-system, 'Segoe UI', sans-serif; background: #fafafa; padding: 32px;">
                <div style="max-width: 480px; margin: 0 auto; background: #ffffff; border: 1px solid #e4e4e7; border-radius: 8px; padding: 32px;">
                    <h1 style="font-size: 20px; margin: 0 0 16px;">"Your Koinon sign-in code"</h1>
                    <p style="color: #52525b;">{prompt}</p>
                    <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px; font-family: monospace;">{code}</p>
                    <p style="color: #71717a; font-size: 13px;">
                        "The code expires in 10 minutes. If you did not request it, you can ignore this email."
                    </p>
                </div>
            </body>
        </html>
    }
}
