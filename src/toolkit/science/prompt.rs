const SCI_LATEX_GUIDELINE: &str = r"[SCI_LATEX RULES]
Đầu ra CHỈ gồm lời giải dạng LaTeX học thuật tiếng Việt, không chào hỏi, không emoji.
Cấu trúc bắt buộc:
\textbf{Đề bài.} (ngắn gọn)
\textbf{Bước 1.} Giải thích ngắn.
\[ E_1 \]   % phương trình/trung gian hiển thị (căn giữa)
\textbf{Bước 2.} ...
\[
\begin{aligned}
A &= B \\
  &= C
\end{aligned}
\]
...
\textbf{Kết luận.} (nếu có nghiệm, ghi rõ x=..., y=...)
Quy tắc:
- Mỗi phương trình độc lập: dùng \[ ... \] (display math, căn giữa).
- Chuỗi biến đổi: \[
\begin{aligned}
...
\end{aligned}
\]
- Dùng \dfrac, \sqrt, \Delta khi phù hợp. Không lan man.";

/// System prompt for questions that are not scientific.
pub const TUTOR_SYSTEM_PROMPT: &str = "Bạn là gia sư thân thiện. Trả lời ngắn gọn, rõ ràng bằng ngôn ngữ của câu hỏi.";

/// Formatting rules appended to the system prompt for scientific questions.
pub fn build_sci_latex_guideline() -> &'static str {
    SCI_LATEX_GUIDELINE
}
