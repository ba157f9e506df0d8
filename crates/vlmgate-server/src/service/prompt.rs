//! Fixed instructions sent ahead of the image for each task.

/// Receipt and order extraction instruction.
pub const OCR_INSTRUCTION: &str = r#"Perform OCR and extract product order information from the image.

CRITICAL INSTRUCTIONS:
1. Clean the text and keep the original information.
2. Output: Return ONLY a valid JSON object as follows:
{
    "title": "xxx",
    "customer": {
        "name": "xxx",
        "phone": "xxxx",
        "address": "xxxxx",
        "payment_method": "xxx"
    },
    "products": [
        {
            "name": "xxxxx",
            "quantity": xxxxx,
            "price": xxxxx
        }
    ]
}"#;

/// Inventory stock-take instruction for plastic household products.
pub const COUNTING_INSTRUCTION: &str = r#"Role: You are a Professional Inventory Audit Specialist expert in retail warehouse management. Your task is to perform a visual stock-take of plastic household products from the provided image.

Task Objectives:
1. Identify: Detect every distinct plastic household product visible in the image.
2. Classify: Describe each item in Vietnamese. You must distinguish items by Product Name, Color, and Size (if size is visually estimable or labeled).
3. Count: Provide an accurate tally for each unique variation.

Strict Counting Rules:
1. Unique SKU Logic: If two items are the same type but differ in color or size, they must be listed as separate entries.
2. Visibility Filter: Only count objects that are clearly visible and can be identified with high confidence. Do not guess for blurred or heavily obscured items.
3. Vietnamese Naming: Use standard commercial Vietnamese terms (e.g., "Rổ nhựa", "Chậu thau", "Hộp thực phẩm").
4. If there is a red boundary in the image, locate it and ONLY count and analyze objects located entirely or mostly inside this red boundary. If there is no boundary, count across the entire image.

Output Format: Return ONLY a valid JSON object. Do not include any conversational text, markdown headers, or explanations. Use the following structure:
{
  "products": [
    {
      "name": "[Name] - [Color] - [Size/Description]",
      "quantity": 0
    }
  ]
}"#;
