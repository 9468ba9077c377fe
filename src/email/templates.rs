pub fn render_reset_code(code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>MedCare Password Reset</h2>
    <p>A password reset was requested for your MedCare account.</p>
    <div style="background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <p style="margin: 0; font-size: 14px; color: #6b7280;">Your verification code is:</p>
        <h1 style="margin: 10px 0; font-size: 32px; letter-spacing: 8px; color: #2563eb;">{code}</h1>
    </div>
    <p style="color: #666; font-size: 14px;">This code expires in 15 minutes and can be used only once. If you didn't request this, you can ignore this email.</p>
</body>
</html>"#
    )
}
