use std::fmt::{self, Display};

use super::{Attachments, Email};

/// Confirmation sent to an applicant after applying for a job
pub struct ApplicationReceived<'a> {
    pub designation: &'a str,
    pub company_name: &'a str,
}

impl<'a> ApplicationReceived<'a> {
    pub fn subject(&self) -> String {
        format!("Application Received for {}", self.designation)
    }

    /// Compose the email for `applicant_email` with both fixed attachments
    pub fn to_email(&self, applicant_email: &str, attachments: &Attachments) -> Email {
        Email {
            to: applicant_email.to_string(),
            subject: self.subject(),
            body: self.to_string(),
            attachments: attachments.to_vec(),
        }
    }
}

impl<'a> Display for ApplicationReceived<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dear Applicant,\n\n\
             Thank you for applying for the {designation} position at {company}. We have received your application and appreciate your interest in joining our team.\n\n\
             Please find attached the job description for your reference. We encourage you to review it to better understand the role and the responsibilities associated with it.\n\n\
             Our hiring team is currently reviewing all applications. If your qualifications match our requirements, we will contact you to discuss the next steps in the hiring process.\n\n\
             Thank you once again for your interest in {company}. We look forward to the possibility of working together.\n\n\
             Best regards,\n\
             [Your Name]\n\
             HR Department\n\
             {company}",
            designation = self.designation,
            company = self.company_name,
        )
    }
}
