use crate::llm::client::ChatMessage;

const SYSTEM_PROMPT: &str = "אתה עוזר חכם שמסכם ישיבות.";

/// Build the fixed summary conversation for a meeting transcript.
///
/// The requested table name contains the tasks-table marker, and the column
/// names match the renderer's target columns.
pub fn build_summary_messages(transcript: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "סכם את הישיבה הבאה, וכתוב בנקודות עיקריות:\n\
1. נושאים שנדונו\n\
2. החלטות שהתקבלו\n\
3. משימות ולמי הוטלו\n\
4. תאריכים חשובים שהוזכרו\n\
\n\
בסיום הסיכום, צור טבלה ברורה בשם 'טבלת משימות לביצוע' הכוללת עמודות: שם המשימה, שם האחראי, תאריך נדרש לביצוע (אם לא ידוע, כתוב 'לא צוין'). \
אל תשאיר שורות ריקות בטבלה. אם לא היו משימות, כתוב שורה אחת בלבד: 'לא נמצאו משימות לביצוע'.\n\
\n\
תמלול הישיבה:\n\
{transcript}"
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{TABLE_MARKER, TARGET_COLUMNS};

    #[test]
    fn prompt_is_system_then_user() {
        let messages = build_summary_messages("hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn transcript_is_embedded_verbatim_at_the_end() {
        let transcript = "Dana: let's start\n  Avi: ok  \n";
        let messages = build_summary_messages(transcript);
        assert!(messages[1].content.ends_with(&format!("תמלול הישיבה:\n{transcript}")));
    }

    #[test]
    fn prompt_requests_the_parsed_table_shape() {
        let content = &build_summary_messages("x")[1].content;
        assert!(content.contains(TABLE_MARKER));
        for column in TARGET_COLUMNS {
            assert!(content.contains(column), "missing column {column}");
        }
        assert!(content.contains("לא צוין"));
        assert!(content.contains("לא נמצאו משימות לביצוע"));
    }
}
